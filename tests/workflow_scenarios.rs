//! End-to-end workflow scenarios over mock adapters.
//!
//! Each test drives `CommitWorkflow` exactly as the `commit` command does,
//! with the adapters replaced by recording mocks.

use lv_cli::core::types::{CommitType, IgnoreSet, RenamedPath, StatusSnapshot};
use lv_cli::engine::{
    CommitWorkflow, Phase, WorkflowOutcome, WorkflowSettings, WorkflowState,
};
use lv_cli::git::mock::{MockOperation, MockVersionControl};
use lv_cli::lint::mock::MockLinter;
use lv_cli::ui::mock::MockPrompter;
use lv_cli::ui::output::Verbosity;

fn settings(tool: &str) -> WorkflowSettings {
    WorkflowSettings {
        tool_name: tool.to_string(),
        verbosity: Verbosity::Quiet,
        ..WorkflowSettings::default()
    }
}

#[tokio::test]
async fn untracked_file_fix_commit() {
    let vcs = MockVersionControl::new(StatusSnapshot::builder().not_added(["a.js"]).build());
    let linter = MockLinter::clean();
    let prompter = MockPrompter::new()
        .select_answer(CommitType::Fix.index())
        .input_answer("null check");
    let workflow = CommitWorkflow::new(&vcs, &linter, &prompter, settings("tool"));

    let mut state = WorkflowState::new();
    let outcome = workflow.run(&mut state).await.unwrap();

    assert_eq!(
        vcs.operations()[1..],
        [
            MockOperation::Stage {
                paths: vec!["a.js".to_string()]
            },
            MockOperation::Commit {
                message: "fix: null check (by tool)".to_string()
            },
        ]
    );
    match outcome {
        WorkflowOutcome::Committed { oid, message } => {
            assert_eq!(message, "fix: null check (by tool)");
            assert_eq!(state.commit(), Some(&oid));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(state.commit_type(), Some(CommitType::Fix));
    assert_eq!(state.commit_message(), Some("null check"));
}

#[tokio::test]
async fn rename_lints_destination_not_source() {
    let vcs = MockVersionControl::new(
        StatusSnapshot::builder()
            .renamed([RenamedPath::new("old.js", "new.js")])
            .build(),
    );
    let linter = MockLinter::clean();
    let prompter = MockPrompter::new().select_answer(0).input_answer("move");
    let workflow = CommitWorkflow::new(&vcs, &linter, &prompter, settings("tool"));

    workflow.run(&mut WorkflowState::new()).await.unwrap();

    let calls = linter.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains(&"new.js".to_string()));
    assert!(!calls[0].contains(&"old.js".to_string()));
    assert_eq!(vcs.staged(), vec![vec!["new.js".to_string()]]);
}

#[tokio::test]
async fn lint_problems_halt_before_any_mutation() {
    let vcs = MockVersionControl::new(
        StatusSnapshot::builder()
            .not_added(["a.js"])
            .modified(["b.js"])
            .build(),
    );
    let linter = MockLinter::with_report("1 problem (1 error, 0 warnings)");
    let prompter = MockPrompter::new().select_answer(0).input_answer("never");
    let workflow = CommitWorkflow::new(&vcs, &linter, &prompter, settings("tool"));

    let mut state = WorkflowState::new();
    let outcome = workflow.run(&mut state).await.unwrap();

    assert_eq!(
        outcome,
        WorkflowOutcome::LintFailed {
            report: "1 problem (1 error, 0 warnings)".to_string()
        }
    );
    assert_eq!(state.phase(), Phase::LintFailed);
    assert_eq!(vcs.operations(), vec![MockOperation::Status]);
    assert!(vcs.staged().is_empty());
    assert!(vcs.commits().is_empty());
    assert!(prompter.calls().is_empty());
}

#[tokio::test]
async fn ignored_and_deleted_paths_are_not_linted() {
    let vcs = MockVersionControl::new(
        StatusSnapshot::builder()
            .not_added([".eslintignore", "a.js"])
            .modified([".gitignore", "b.js"])
            .created(["c.js"])
            .deleted(["d.js"])
            .build(),
    );
    let linter = MockLinter::clean();
    let prompter = MockPrompter::new().select_answer(0).input_answer("m");
    let workflow = CommitWorkflow::new(&vcs, &linter, &prompter, settings("tool"));

    workflow.run(&mut WorkflowState::new()).await.unwrap();

    assert_eq!(
        linter.calls(),
        vec![vec!["a.js".to_string(), "b.js".to_string(), "c.js".to_string()]]
    );
    // Ignored paths are still committed.
    assert_eq!(vcs.staged()[0], vec![".eslintignore", "a.js"]);
}

#[tokio::test]
async fn custom_ignore_set_and_tool_name() {
    let vcs = MockVersionControl::new(
        StatusSnapshot::builder()
            .modified(["package-lock.json", "index.js"])
            .build(),
    );
    let linter = MockLinter::clean();
    let prompter = MockPrompter::new()
        .select_answer(CommitType::Build.index())
        .input_answer("bump deps");
    let settings = WorkflowSettings {
        ignore: IgnoreSet::new(["package-lock.json"]),
        ..settings("release-bot")
    };
    let workflow = CommitWorkflow::new(&vcs, &linter, &prompter, settings);

    workflow.run(&mut WorkflowState::new()).await.unwrap();

    assert_eq!(linter.calls(), vec![vec!["index.js".to_string()]]);
    assert_eq!(vcs.commits(), vec!["build: bump deps (by release-bot)"]);
}

#[tokio::test]
async fn non_interactive_prompt_aborts_without_commit() {
    let vcs = MockVersionControl::new(StatusSnapshot::builder().modified(["a.js"]).build());
    let linter = MockLinter::clean();
    let prompter = MockPrompter::non_interactive();
    let workflow = CommitWorkflow::new(&vcs, &linter, &prompter, settings("tool"));

    let err = workflow.run(&mut WorkflowState::new()).await.unwrap_err();

    assert_eq!(err.to_string(), "prompt: not in interactive mode");
    assert!(!vcs.mutated());
}

#[tokio::test]
async fn exactly_one_commit_per_clean_run() {
    for commit_type in CommitType::ALL {
        let vcs = MockVersionControl::new(StatusSnapshot::builder().modified(["a.js"]).build());
        let linter = MockLinter::clean();
        let prompter = MockPrompter::new()
            .select_answer(commit_type.index())
            .input_answer("change");
        let workflow = CommitWorkflow::new(&vcs, &linter, &prompter, settings("t"));

        workflow.run(&mut WorkflowState::new()).await.unwrap();

        assert_eq!(
            vcs.commits(),
            vec![format!("{}: change (by t)", commit_type.token())]
        );
    }
}
