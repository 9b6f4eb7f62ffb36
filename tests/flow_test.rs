// tests/flow_test.rs
//
// End-to-end branch-start scenarios against the mock backends. Each test
// wires a BranchStarter the same way main does, with a scripted prompter
// standing in for the operator.

use git_flow::build::MockBuild;
use git_flow::config::GitFlowConfig;
use git_flow::error::GitFlowError;
use git_flow::flow::{BranchStarter, FlowKind, StartOptions};
use git_flow::git::MockGit;
use git_flow::git::VersionControl;
use git_flow::prompt::ScriptedPrompter;

fn starter<'a>(
    git: &'a MockGit,
    build: &'a MockBuild,
    prompter: &'a ScriptedPrompter,
    config: &'a GitFlowConfig,
) -> BranchStarter<'a> {
    BranchStarter::new(git, build, prompter, config, StartOptions::default())
}

#[test]
fn test_hotfix_accepting_proposed_version() {
    // Scenario: version 1.2.0, no support branches, operator accepts the
    // proposal by pressing Enter.
    let git = MockGit::new("master");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig::default();

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Hotfix)
        .unwrap();

    assert_eq!(outcome.branch, "hotfix/1.2.1");
    assert_eq!(outcome.version.as_deref(), Some("1.2.1"));
    assert_eq!(build.version_history(), vec!["1.2.1"]);

    // No support branches, so the only prompt is the version question
    assert_eq!(prompter.asked(), vec!["What is the hotfix version? [1.2.1]"]);

    assert_eq!(
        git.operations(),
        vec![
            "status",
            "list support/",
            "exists hotfix/1.2.1",
            "create hotfix/1.2.1 from master",
            "commit updating poms for hotfix",
        ]
    );
    assert_eq!(git.current_branch().unwrap(), "hotfix/1.2.1");
}

#[test]
fn test_hotfix_from_selected_support_branch() {
    // Scenario: a support line exists and the operator picks it from the
    // menu instead of production.
    let git = MockGit::new("master");
    git.add_branch("support/1.2");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("1"), Some("")]);
    let config = GitFlowConfig::default();

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Hotfix)
        .unwrap();

    assert_eq!(outcome.branch, "hotfix/1.2.1");
    assert_eq!(
        git.operations(),
        vec![
            "status",
            "list support/",
            "checkout support/1.2",
            "exists hotfix/1.2.1",
            "create hotfix/1.2.1 from support/1.2",
            "commit updating poms for hotfix",
        ]
    );
}

#[test]
fn test_hotfix_menu_index_zero_is_production() {
    let git = MockGit::new("master");
    git.add_branch("support/1.2");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("0"), Some("")]);
    let config = GitFlowConfig::default();

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Hotfix)
        .unwrap();

    assert_eq!(outcome.branch, "hotfix/1.2.1");
    assert!(git
        .operations()
        .contains(&"create hotfix/1.2.1 from master".to_string()));
}

#[test]
fn test_hotfix_cancelled_selection_falls_back_to_production() {
    let git = MockGit::new("master");
    git.add_branch("support/1.2");
    let build = MockBuild::new("1.2.0");
    // Menu prompt cancelled, version prompt cancelled: both fall back
    let prompter = ScriptedPrompter::cancelling();
    let config = GitFlowConfig::default();

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Hotfix)
        .unwrap();

    assert_eq!(outcome.branch, "hotfix/1.2.1");
    assert!(git
        .operations()
        .contains(&"create hotfix/1.2.1 from master".to_string()));
}

#[test]
fn test_hotfix_version_override() {
    let git = MockGit::new("master");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("2.0.0")]);
    let config = GitFlowConfig::default();

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Hotfix)
        .unwrap();

    assert_eq!(outcome.branch, "hotfix/2.0.0");
    assert_eq!(build.version_history(), vec!["2.0.0"]);
}

#[test]
fn test_hotfix_unparsable_version_uses_configured_default() {
    let git = MockGit::new("master");
    let build = MockBuild::new("not-a-version");
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig::default();

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Hotfix)
        .unwrap();

    assert_eq!(outcome.branch, "hotfix/1.0.1");
    assert_eq!(outcome.version.as_deref(), Some("1.0.1"));
}

#[test]
fn test_existing_target_branch_aborts_before_any_mutation() {
    // Scenario: the computed hotfix branch already exists. The run aborts
    // at the conflict check with no checkout/create/commit issued.
    let git = MockGit::new("master");
    git.add_branch("hotfix/1.2.1");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig::default();

    let err = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Hotfix)
        .unwrap_err();

    assert!(matches!(err, GitFlowError::Conflict(_)));
    assert!(git.mutating_operations().is_empty());
    assert!(build.version_history().is_empty());
    assert_eq!(git.current_branch().unwrap(), "master");
}

#[test]
fn test_dirty_working_tree_aborts_with_zero_commands() {
    let git = MockGit::new("master");
    git.set_dirty(true);
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig::default();

    let err = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Hotfix)
        .unwrap_err();

    assert!(matches!(err, GitFlowError::DirtyWorkingTree));
    // The status query is the check itself; nothing else ran
    assert_eq!(git.operations(), vec!["status"]);
    assert!(build.version_history().is_empty());
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_support_truncates_to_major_minor() {
    let git = MockGit::new("master");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig::default();

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Support)
        .unwrap();

    assert_eq!(outcome.branch, "support/1.2");
    assert_eq!(outcome.version.as_deref(), Some("1.2"));
    assert_eq!(prompter.asked(), vec!["What is the support version? [1.2]"]);
    assert!(git
        .operations()
        .contains(&"commit updating poms for support".to_string()));
}

#[test]
fn test_support_batch_mode_skips_prompts() {
    let git = MockGit::new("master");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::cancelling();
    let config = GitFlowConfig::default();
    let options = StartOptions {
        install: false,
        interactive: false,
    };

    let outcome = BranchStarter::new(&git, &build, &prompter, &config, options)
        .start(FlowKind::Support)
        .unwrap();

    assert_eq!(outcome.branch, "support/1.2");
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_release_starts_from_development_branch() {
    let git = MockGit::new("master");
    git.add_branch("develop");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig::default();

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Release)
        .unwrap();

    // A release names what is already on the development line
    assert_eq!(outcome.branch, "release/1.2.0");
    assert_eq!(build.version_history(), vec!["1.2.0"]);
    assert_eq!(
        git.operations(),
        vec![
            "status",
            "list release/",
            "checkout develop",
            "exists release/1.2.0",
            "create release/1.2.0 from develop",
            "commit updating poms for release",
        ]
    );
}

#[test]
fn test_release_refuses_second_release_line() {
    let git = MockGit::new("master");
    git.add_branch("develop");
    git.add_branch("release/1.1.0");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig::default();

    let err = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Release)
        .unwrap_err();

    assert!(matches!(err, GitFlowError::Conflict(_)));
    // Rejected before any checkout
    assert!(git.mutating_operations().is_empty());
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_feature_start_carries_no_version_change() {
    let git = MockGit::new("master");
    git.add_branch("develop");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("login-rework")]);
    let config = GitFlowConfig::default();

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Feature)
        .unwrap();

    assert_eq!(outcome.branch, "feature/login-rework");
    assert_eq!(outcome.version, None);
    assert!(build.version_history().is_empty());
    assert_eq!(
        git.operations(),
        vec![
            "status",
            "checkout develop",
            "exists feature/login-rework",
            "create feature/login-rework from develop",
        ]
    );
}

#[test]
fn test_feature_cancelled_name_is_fatal() {
    let git = MockGit::new("master");
    git.add_branch("develop");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::cancelling();
    let config = GitFlowConfig::default();

    let err = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Feature)
        .unwrap_err();

    assert!(matches!(err, GitFlowError::Validation(_)));
    assert!(git.mutating_operations().len() <= 1); // only the develop checkout
}

#[test]
fn test_feature_invalid_name_is_fatal() {
    let git = MockGit::new("master");
    git.add_branch("develop");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("bad name")]);
    let config = GitFlowConfig::default();

    let err = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Feature)
        .unwrap_err();

    assert!(matches!(err, GitFlowError::Validation(_)));
}

#[test]
fn test_install_runs_after_version_commit() {
    let git = MockGit::new("master");
    let build = MockBuild::new("1.2.0");
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig::default();
    let options = StartOptions {
        install: true,
        interactive: true,
    };

    let outcome = BranchStarter::new(&git, &build, &prompter, &config, options)
        .start(FlowKind::Hotfix)
        .unwrap();

    assert_eq!(build.installs(), 1);
    assert_eq!(outcome.install_error, None);
}

#[test]
fn test_install_failure_keeps_branch_and_commit() {
    let git = MockGit::new("master");
    let build = MockBuild::new("1.2.0");
    build.fail_install();
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig::default();
    let options = StartOptions {
        install: true,
        interactive: true,
    };

    let outcome = BranchStarter::new(&git, &build, &prompter, &config, options)
        .start(FlowKind::Hotfix)
        .unwrap();

    assert!(outcome.install_error.is_some());
    assert_eq!(outcome.branch, "hotfix/1.2.1");
    assert!(git
        .operations()
        .contains(&"commit updating poms for hotfix".to_string()));
}

#[test]
fn test_custom_prefixes_and_branches() {
    let git = MockGit::new("main");
    let build = MockBuild::new("3.4.5");
    let prompter = ScriptedPrompter::new([Some("")]);
    let config = GitFlowConfig {
        production_branch: "main".to_string(),
        hotfix_prefix: "fix/".to_string(),
        ..GitFlowConfig::default()
    };

    let outcome = starter(&git, &build, &prompter, &config)
        .start(FlowKind::Hotfix)
        .unwrap();

    assert_eq!(outcome.branch, "fix/3.4.6");
    assert!(git
        .operations()
        .contains(&"create fix/3.4.6 from main".to_string()));
}
