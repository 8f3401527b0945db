//! Markdown body of the roulette note and its opt-in checkbox.

use crate::models::SelectionResult;

/// Text following the checkbox. Its leading words identify a roulette note.
pub const OPT_IN_LABEL: &str = "Give me two new approvers on the next push / job retry";

const OPT_IN_KEY: &str = "Give me two new approvers";

/// Unchecked checkbox line as posted.
pub fn unchecked_opt_in() -> String {
    format!("- [ ] {}", OPT_IN_LABEL)
}

/// Check if a note body carries the opt-in checkbox in either state.
pub fn has_opt_in(body: &str) -> bool {
    body.contains(OPT_IN_KEY)
}

/// Check if a human ticked the opt-in checkbox.
pub fn is_opt_in_checked(body: &str) -> bool {
    ["- [x] ", "- [X] "]
        .iter()
        .any(|checkbox| body.contains(&format!("{}{}", checkbox, OPT_IN_KEY)))
}

/// Render the note announcing `selection`.
///
/// `job_url` links back to the CI job; the sentence is shortened when absent.
pub fn format_note_body(selection: &SelectionResult, job_url: Option<&str>) -> String {
    let job = match job_url {
        Some(url) if !url.is_empty() => format!("[reviewer roulette job]({})", url),
        _ => "reviewer roulette job".to_string(),
    };
    let maintainer = &selection.maintainer;
    let developer = &selection.developer;

    format!(
        r#"## :wheel_of_dharma: Reviewer Roulette

To spread load more evenly across eligible reviewers and to enable speedy review the Roulette Bot has randomly selected two reviewers for this MR.

You can make different choices if you think someone else would be better-suited or if someone is on holiday (the bot checks for the :palm_tree: and :face_with_thermometer: emojis on Slack). Other people are free to review if they'd like to as well.

Once you've decided who will review this merge request **please assign them as a reviewer!** Roulette Bot does not do this automatically.

| Reviewer Category | Name |
| ------ | ------ |
| Senior Developers | {} ({}) |
| All Developers | {} ({}) |

If you'd like the {} that generated this message to get two new random approvers check the box below and rerun it in the pipeline.
{}
"#,
        maintainer.name,
        maintainer.email,
        developer.name,
        developer.email,
        job,
        unchecked_opt_in()
    )
}
