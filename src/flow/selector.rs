//! Source-branch selection via a numbered menu.
//!
//! The menu always carries the production branch at index 0; discovered
//! branches follow at 1..N in catalog order. Rendering is split from
//! interaction so the menu text is testable on its own.

use crate::error::{GitFlowError, Result};
use crate::prompt::Prompter;

/// Builds the menu text and the exact set of acceptable answers.
///
/// # Arguments
/// * `candidates` - Discovered branches, in catalog order
/// * `base_branch` - Branch shown at index 0
/// * `title` - Heading line (e.g. "Support branches:")
/// * `question` - Closing line asking for the choice
pub fn format_branch_menu(
    candidates: &[String],
    base_branch: &str,
    title: &str,
    question: &str,
) -> (String, Vec<String>) {
    let mut menu = String::new();
    menu.push_str(title);
    menu.push('\n');
    menu.push_str(&format!("0. {}\n", base_branch));

    let mut allowed = vec!["0".to_string()];
    for (i, candidate) in candidates.iter().enumerate() {
        menu.push_str(&format!("{}. {}\n", i + 1, candidate));
        allowed.push((i + 1).to_string());
    }

    menu.push_str(question);
    (menu, allowed)
}

/// Resolves the branch to operate from.
///
/// With no candidates the base branch is returned immediately, without any
/// interaction. Otherwise the operator picks from the numbered menu; the
/// prompt loops until a non-blank answer arrives. A cancelled prompt falls
/// back to the base branch. A resolution that yields a blank branch name is
/// a validation error, fatal to the invocation.
pub fn select_source_branch(
    prompter: &dyn Prompter,
    candidates: &[String],
    base_branch: &str,
    title: &str,
    question: &str,
) -> Result<String> {
    if candidates.is_empty() {
        return Ok(base_branch.to_string());
    }

    let (menu, allowed) = format_branch_menu(candidates, base_branch, title, question);

    let answer = loop {
        match prompter.prompt_choice(&menu, &allowed)? {
            Some(answer) if !answer.trim().is_empty() => break answer,
            Some(_) => continue,
            None => {
                tracing::warn!(base_branch, "branch selection cancelled, using base branch");
                return Ok(base_branch.to_string());
            }
        }
    };

    let index: usize = answer
        .trim()
        .parse()
        .map_err(|_| GitFlowError::validation(format!("'{}' is not a menu index", answer)))?;

    let resolved = if index == 0 {
        base_branch
    } else {
        candidates
            .get(index - 1)
            .map(String::as_str)
            .ok_or_else(|| {
                GitFlowError::validation(format!("selection {} is out of range", index))
            })?
    };

    if resolved.trim().is_empty() {
        return Err(GitFlowError::validation(
            "branch name to operate on is blank",
        ));
    }

    Ok(resolved.to_string())
}
