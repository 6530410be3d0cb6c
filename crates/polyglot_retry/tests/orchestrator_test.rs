//! Tests for the model fallback orchestrator.

mod test_utils;

use polyglot_error::{EXHAUSTED_FALLBACK_MESSAGE, FallbackErrorKind};
use polyglot_retry::{
    AttemptOutcome, BackoffSchedule, CancellationToken, FallbackConfig, FallbackOrchestrator,
    ProviderFailure,
};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{CancellingGenerator, CancellingSleeper, RecordingSleeper, ScriptedGenerator};

fn two_models(max_passes: usize) -> FallbackConfig {
    FallbackConfig::new(["A", "B"], max_passes, BackoffSchedule::default()).unwrap()
}

#[tokio::test]
async fn test_first_model_success_calls_nothing_else() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .always_ok("A", "hallo")
        .always_ok("B", "unused");
    let sleeper = RecordingSleeper::new();
    let orchestrator =
        FallbackOrchestrator::new(generator.clone(), &two_models(3))?.with_sleeper(sleeper.clone());

    let text = orchestrator.run("Wie geht's?").await?;

    assert_eq!(text, "hallo");
    assert_eq!(generator.calls(), vec!["A"]);
    assert!(sleeper.delays().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_retryable_failure_falls_through_to_next_model() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .always_fail("A", "429 rate limit")
        .always_ok("B", "hello");
    let sleeper = RecordingSleeper::new();
    let orchestrator =
        FallbackOrchestrator::new(generator.clone(), &two_models(2))?.with_sleeper(sleeper.clone());

    let text = orchestrator.run("prompt").await?;

    assert_eq!(text, "hello");
    assert_eq!(generator.calls(), vec!["A", "B"]);
    assert!(sleeper.delays().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unavailable_status_falls_through_to_next_model() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .always_fail("A", "status: UNAVAILABLE")
        .always_ok("B", "bonjour");
    let orchestrator = FallbackOrchestrator::new(generator.clone(), &two_models(2))?
        .with_sleeper(RecordingSleeper::new());

    let text = orchestrator.run("prompt").await?;

    assert_eq!(text, "bonjour");
    assert_eq!(generator.calls(), vec!["A", "B"]);
    Ok(())
}

#[tokio::test]
async fn test_fatal_failure_aborts_immediately() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .always_fail("A", "invalid API key")
        .always_ok("B", "never");
    let sleeper = RecordingSleeper::new();
    let orchestrator =
        FallbackOrchestrator::new(generator.clone(), &two_models(3))?.with_sleeper(sleeper.clone());

    let err = orchestrator.run("prompt").await.unwrap_err();

    assert_eq!(generator.calls(), vec!["A"]);
    assert!(sleeper.delays().is_empty());
    assert_eq!(err.user_message(), "invalid API key");
    match err.kind {
        FallbackErrorKind::Fatal { model, status_code, .. } => {
            assert_eq!(model, "A");
            assert_eq!(status_code, None);
        }
        other => panic!("expected fatal, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_fatal_failure_mid_pass_stops_later_passes() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .always_fail("A", "503 overloaded")
        .script(
            "B",
            [
                Err(ProviderFailure::new("503 overloaded")),
                Err(ProviderFailure::with_status(400, "malformed request")),
            ],
        );
    let sleeper = RecordingSleeper::new();
    let orchestrator =
        FallbackOrchestrator::new(generator.clone(), &two_models(3))?.with_sleeper(sleeper.clone());

    let err = orchestrator.run("prompt").await.unwrap_err();

    // Pass 0: A, B retryable. Pass 1: A retryable, B fatal.
    assert_eq!(generator.calls(), vec!["A", "B", "A", "B"]);
    assert_eq!(sleeper.delays(), vec![Duration::from_secs(1)]);
    match err.kind {
        FallbackErrorKind::Fatal { model, status_code, message } => {
            assert_eq!(model, "B");
            assert_eq!(status_code, Some(400));
            assert_eq!(message, "malformed request");
        }
        other => panic!("expected fatal, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_success_in_second_pass_after_one_backoff() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .script(
            "A",
            [Err(ProviderFailure::new("503 overloaded")), Ok("wieder da".to_string())],
        )
        .always_fail("B", "503 overloaded");
    let sleeper = RecordingSleeper::new();
    let config = two_models(3);
    let orchestrator =
        FallbackOrchestrator::new(generator.clone(), &config)?.with_sleeper(sleeper.clone());

    let text = orchestrator.run("prompt").await?;

    assert_eq!(text, "wieder da");
    assert_eq!(generator.call_count(), 3);
    assert_eq!(sleeper.delays(), vec![config.backoff().delay(0)]);
    Ok(())
}

#[tokio::test]
async fn test_exhaustion_surfaces_last_error() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .always_fail("A", "429 rate limit")
        .always_fail("B", "503 overloaded");
    let sleeper = RecordingSleeper::new();
    let max_passes = 3;
    let orchestrator = FallbackOrchestrator::new(generator.clone(), &two_models(max_passes))?
        .with_sleeper(sleeper.clone());

    let err = orchestrator.run("prompt").await.unwrap_err();

    assert_eq!(generator.call_count(), max_passes * 2);
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
    assert_eq!(err.user_message(), "503 overloaded");
    match err.kind {
        FallbackErrorKind::Exhausted { attempts, .. } => assert_eq!(attempts, 6),
        other => panic!("expected exhausted, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_exhaustion_keeps_status_code() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new().script(
        "A",
        [Err(ProviderFailure::with_status(503, ""))],
    );
    let config = FallbackConfig::new(["A"], 2, BackoffSchedule::None)?;
    let orchestrator =
        FallbackOrchestrator::new(generator, &config)?.with_sleeper(RecordingSleeper::new());

    let err = orchestrator.run("prompt").await.unwrap_err();

    assert_eq!(err.user_message(), EXHAUSTED_FALLBACK_MESSAGE);
    match err.kind {
        FallbackErrorKind::Exhausted { status_code, .. } => assert_eq!(status_code, Some(503)),
        other => panic!("expected exhausted, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_single_pass_never_sleeps() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .always_fail("A", "rate limit")
        .always_fail("B", "rate limit");
    let sleeper = RecordingSleeper::new();
    let orchestrator =
        FallbackOrchestrator::new(generator.clone(), &two_models(1))?.with_sleeper(sleeper.clone());

    assert!(orchestrator.run("prompt").await.is_err());
    assert_eq!(generator.call_count(), 2);
    assert!(sleeper.delays().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_report_records_each_attempt() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .script(
            "A",
            [Err(ProviderFailure::new("429")), Ok("fertig".to_string())],
        )
        .always_fail("B", "overloaded");
    let config = FallbackConfig::new(["A", "B"], 2, BackoffSchedule::Fixed { delay_ms: 5 })?;
    let orchestrator =
        FallbackOrchestrator::new(generator, &config)?.with_sleeper(RecordingSleeper::new());

    let report = orchestrator
        .run_with_report("prompt", &CancellationToken::new())
        .await;

    assert_eq!(report.models_called(), vec!["A", "B", "A"]);
    let passes: Vec<usize> = report.attempts().iter().map(|a| *a.pass()).collect();
    assert_eq!(passes, vec![0, 0, 1]);
    assert!(matches!(
        report.attempts()[0].outcome(),
        AttemptOutcome::Retryable(_)
    ));
    assert_eq!(report.attempts()[2].outcome(), &AttemptOutcome::Succeeded);
    assert_eq!(report.delays(), &vec![Duration::from_millis(5)]);
    assert_eq!(report.into_result()?, "fertig");
    Ok(())
}

#[tokio::test]
async fn test_cancelled_before_start_makes_no_calls() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new().always_ok("A", "unused");
    let orchestrator = FallbackOrchestrator::new(generator.clone(), &two_models(3))?;
    let token = CancellationToken::new();
    token.cancel();

    let err = orchestrator
        .run_until_cancelled("prompt", &token)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.kind, FallbackErrorKind::Cancelled { attempts: 0 });
    assert_eq!(generator.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_cancellation_interrupts_backoff_sleep() -> anyhow::Result<()> {
    let token = CancellationToken::new();
    let generator = ScriptedGenerator::new()
        .always_fail("A", "503")
        .always_fail("B", "503");
    let orchestrator = FallbackOrchestrator::new(generator.clone(), &two_models(3))?
        .with_sleeper(CancellingSleeper {
            token: token.clone(),
        });

    let report = orchestrator.run_with_report("prompt", &token).await;

    assert_eq!(generator.call_count(), 2);
    assert!(report.delays().is_empty());
    let err = report.into_result().unwrap_err();
    assert_eq!(err.kind, FallbackErrorKind::Cancelled { attempts: 2 });
    Ok(())
}

#[tokio::test]
async fn test_cancellation_interrupts_pending_generate() -> anyhow::Result<()> {
    let token = CancellationToken::new();
    let generator = CancellingGenerator::new(token.clone(), 2);
    let orchestrator = FallbackOrchestrator::new(generator.clone(), &two_models(3))?
        .with_sleeper(RecordingSleeper::new());

    let err = orchestrator
        .run_until_cancelled("prompt", &token)
        .await
        .unwrap_err();

    assert_eq!(generator.call_count(), 2);
    assert_eq!(err.kind, FallbackErrorKind::Cancelled { attempts: 2 });
    assert_eq!(err.user_message(), "Request cancelled");
    Ok(())
}

#[tokio::test]
async fn test_concurrent_runs_are_independent() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new()
        .always_fail("A", "429 rate limit")
        .always_ok("B", "ok");
    let orchestrator = Arc::new(
        FallbackOrchestrator::new(generator.clone(), &two_models(2))?
            .with_sleeper(RecordingSleeper::new()),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.run(&format!("prompt {i}")).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await??, "ok");
    }
    assert_eq!(generator.call_count(), 8);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_tokio_sleeper_waits_out_backoff() -> anyhow::Result<()> {
    let generator = ScriptedGenerator::new().script(
        "A",
        [Err(ProviderFailure::new("overloaded")), Ok("done".to_string())],
    );
    let config = FallbackConfig::new(["A"], 2, BackoffSchedule::Fixed { delay_ms: 1500 })?;
    let orchestrator = FallbackOrchestrator::new(generator, &config)?;

    let started = tokio::time::Instant::now();
    let text = orchestrator.run("prompt").await?;

    assert_eq!(text, "done");
    assert!(started.elapsed() >= Duration::from_millis(1500));
    Ok(())
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config: FallbackConfig = serde_json::from_str(r#"{ "models": [] }"#).unwrap();
    let result = FallbackOrchestrator::new(ScriptedGenerator::new(), &config);
    assert!(result.is_err());
}
