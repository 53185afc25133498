use chrono::{DateTime, Utc};
use rssr::{html, json, Meta, Outcome, PageModule, PageProps};
use serde::{Deserialize, Serialize};

/// What the action hands back to the page
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Submission {
    name: String,
    submitted_at: DateTime<Utc>,
}

pub fn page() -> PageModule {
    PageModule::new(render)
        .meta(|_ctx| {
            Box::pin(async {
                Ok(Meta::new()
                    .with("title", "Actions demo • rssr")
                    .with("description", "Server actions and actionData in the page"))
            })
        })
        .loader(|_ctx| {
            Box::pin(async {
                Ok(json!({ "note": "Submit the form to see actionData populated from the server action." }).into())
            })
        })
        .action(|ctx| {
            Box::pin(async move {
                let name = ctx.form().get("name").cloned().unwrap_or_default();
                Outcome::data(Submission {
                    name,
                    submitted_at: Utc::now(),
                })
            })
        })
}

fn render(props: &PageProps) -> rssr::Markup {
    let note = props.loader("note").and_then(|v| v.as_str()).unwrap_or_default();
    let submission = serde_json::from_value::<Submission>(props.action_data.clone())
        .ok()
        .filter(|s| !s.name.is_empty());

    html! {
        div.stack {
            p.sub { (note) }
            form method="post" {
                label {
                    span { "Your name:" }
                    input type="text" name="name" placeholder="Ada Lovelace"
                        value=[submission.as_ref().map(|s| s.name.as_str())];
                }
                button.button type="submit" { "Submit" }
            }
            @match &submission {
                Some(submission) => {
                    div.notice {
                        p { "Thanks, " (submission.name) "!" }
                        p { "Submitted at: " (submission.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")) }
                    }
                }
                None => {
                    p { "No submission yet." }
                }
            }
        }
    }
}
