//! Action status polling
//!
//! Polls a provider-side action at a fixed interval until it reaches a
//! terminal status or the attempt budget runs out. A timeout is a normal
//! outcome, not an error: the action keeps running on the provider side.

use crate::client::HcloudClient;
use crate::error::Result;
use crate::model::{Action, ActionStatus};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Source of action status updates
///
/// [`HcloudClient`] is the production implementation; tests script
/// status sequences without a server.
#[async_trait]
pub trait ActionSource {
    async fn fetch_action(&self, action_id: u64) -> Result<Action>;
}

#[async_trait]
impl ActionSource for HcloudClient {
    async fn fetch_action(&self, action_id: u64) -> Result<Action> {
        self.get_action(action_id).await
    }
}

/// Polling policy: fixed interval, bounded attempts
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Delay between two status fetches
    pub interval: Duration,

    /// Status fetches before giving up
    pub max_attempts: u32,
}

impl Default for PollConfig {
    /// 5 seconds x 720 attempts, roughly one hour.
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 720,
        }
    }
}

/// Terminal outcome of waiting on an action
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// The action finished successfully.
    Succeeded(Action),
    /// The provider reported the action as failed.
    Failed(Action),
    /// No terminal status within the attempt budget.
    TimedOut {
        attempts: u32,
        /// Last observed state, if any fetch succeeded.
        last: Option<Action>,
    },
}

/// Poll `action_id` until it is terminal or `config.max_attempts`
/// fetches have been made.
///
/// `on_progress` receives every observed action. Progress reported to
/// the callback never decreases, whatever the provider returns.
pub async fn wait_for_action<F>(
    source: &impl ActionSource,
    action_id: u64,
    config: PollConfig,
    mut on_progress: F,
) -> Result<PollOutcome>
where
    F: FnMut(&Action),
{
    let mut max_progress = 0u8;
    let mut last_seen = None;

    for attempt in 0..config.max_attempts {
        let mut action = source.fetch_action(action_id).await?;
        max_progress = max_progress.max(action.progress);
        action.progress = max_progress;
        tracing::debug!(
            "Action {} is {} at {}% (attempt {}/{})",
            action.id,
            action.status,
            action.progress,
            attempt + 1,
            config.max_attempts
        );
        on_progress(&action);

        match action.status {
            ActionStatus::Success => return Ok(PollOutcome::Succeeded(action)),
            ActionStatus::Error => return Ok(PollOutcome::Failed(action)),
            ActionStatus::Running => {}
        }

        last_seen = Some(action);
        if attempt + 1 < config.max_attempts {
            sleep(config.interval).await;
        }
    }

    Ok(PollOutcome::TimedOut {
        attempts: config.max_attempts,
        last: last_seen,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActionError;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedActions {
        responses: Mutex<VecDeque<Action>>,
    }

    impl ScriptedActions {
        fn new(responses: Vec<Action>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }

        fn remaining(&self) -> usize {
            self.responses.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ActionSource for ScriptedActions {
        async fn fetch_action(&self, _action_id: u64) -> Result<Action> {
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted"))
        }
    }

    fn running(progress: u8) -> Action {
        Action {
            id: 7,
            command: "create_image".to_string(),
            status: ActionStatus::Running,
            progress,
            error: None,
        }
    }

    fn success() -> Action {
        Action {
            id: 7,
            command: "create_image".to_string(),
            status: ActionStatus::Success,
            progress: 100,
            error: None,
        }
    }

    fn failed(code: &str) -> Action {
        Action {
            id: 7,
            command: "create_image".to_string(),
            status: ActionStatus::Error,
            progress: 60,
            error: Some(ActionError {
                code: code.to_string(),
                message: "action failed".to_string(),
            }),
        }
    }

    fn quick(max_attempts: u32) -> PollConfig {
        PollConfig {
            interval: Duration::ZERO,
            max_attempts,
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_exactly_three_polls() {
        let source = ScriptedActions::new(vec![running(10), running(60), success()]);
        let mut observed = Vec::new();

        let outcome = wait_for_action(&source, 7, quick(10), |a| observed.push(a.progress))
            .await
            .unwrap();

        assert!(matches!(outcome, PollOutcome::Succeeded(_)));
        assert_eq!(observed, vec![10, 60, 100]);
        assert_eq!(source.remaining(), 0);
    }

    #[tokio::test]
    async fn test_times_out_after_max_attempts() {
        let source = ScriptedActions::new(vec![running(0); 10]);

        let outcome = wait_for_action(&source, 7, quick(4), |_| {}).await.unwrap();

        match outcome {
            PollOutcome::TimedOut { attempts, last } => {
                assert_eq!(attempts, 4);
                assert!(last.is_some());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        // Exactly four fetches, not one more.
        assert_eq!(source.remaining(), 6);
    }

    #[tokio::test]
    async fn test_failed_action_carries_error_payload() {
        let source = ScriptedActions::new(vec![running(10), failed("server_locked")]);

        let outcome = wait_for_action(&source, 7, quick(10), |_| {}).await.unwrap();

        match outcome {
            PollOutcome::Failed(action) => {
                assert_eq!(action.error.unwrap().code, "server_locked");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_progress_never_decreases() {
        let source = ScriptedActions::new(vec![running(30), running(10), success()]);
        let mut observed = Vec::new();

        wait_for_action(&source, 7, quick(10), |a| observed.push(a.progress))
            .await
            .unwrap();

        assert_eq!(observed, vec![30, 30, 100]);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        struct Broken;

        #[async_trait]
        impl ActionSource for Broken {
            async fn fetch_action(&self, _action_id: u64) -> Result<Action> {
                Err(crate::error::HcloudError::Api {
                    code: "500".to_string(),
                    message: "boom".to_string(),
                })
            }
        }

        let result = wait_for_action(&Broken, 7, quick(3), |_| {}).await;
        assert!(result.is_err());
    }
}
