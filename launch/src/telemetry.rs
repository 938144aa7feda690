use metrics::counter;

pub struct Telemetry;

impl Telemetry {
    pub fn record_launch_assembled(message_type: &str) {
        counter!("lti_launches_assembled_total", "message_type" => message_type.to_string())
            .increment(1);
    }

    pub fn record_failure(kind: &str) {
        counter!("lti_launch_failures_total", "kind" => kind.to_string()).increment(1);
    }

    pub fn record_custom_variables_removed(count: usize) {
        if count > 0 {
            counter!("lti_custom_variables_removed_total").increment(count as u64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::CompositeKey;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    type SnapshotVec = Vec<(
        CompositeKey,
        Option<metrics::Unit>,
        Option<metrics::SharedString>,
        DebugValue
    )>;

    fn with_test_recorder(f: impl FnOnce()) -> SnapshotVec {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        metrics::with_local_recorder(&recorder, f);
        snapshotter.snapshot().into_vec()
    }

    fn counter_value(snapshot: &SnapshotVec, name: &str) -> Option<u64> {
        snapshot.iter().find_map(|(k, _, _, v)| match v {
            DebugValue::Counter(value) if k.key().name() == name => Some(*value),
            _ => None
        })
    }

    #[test]
    fn test_failure_counter_is_labelled_by_kind() {
        let snapshot = with_test_recorder(|| {
            Telemetry::record_failure("upstream_data_failure");
            Telemetry::record_failure("upstream_data_failure");
        });

        let (key, _, _, _) = &snapshot[0];
        assert_eq!(key.key().name(), "lti_launch_failures_total");
        assert!(
            key.key()
                .labels()
                .any(|l| l.key() == "kind" && l.value() == "upstream_data_failure")
        );
        assert_eq!(counter_value(&snapshot, "lti_launch_failures_total"), Some(2));
    }

    #[test]
    fn test_removed_counter_skips_zero() {
        let snapshot = with_test_recorder(|| Telemetry::record_custom_variables_removed(0));
        assert!(counter_value(&snapshot, "lti_custom_variables_removed_total").is_none());

        let snapshot = with_test_recorder(|| Telemetry::record_custom_variables_removed(3));
        assert_eq!(
            counter_value(&snapshot, "lti_custom_variables_removed_total"),
            Some(3)
        );
    }
}
