use crate::common::{Counter, Greeter};
use crate::utils::{guest_names, increments, unknown_method_name};
use method_stub::{CallRecord, StubRegistry};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_history_matches_call_sequence(values in increments()) {
        let registry = StubRegistry::new(Counter::default());
        let mut running = 0u64;
        for value in &values {
            running += value;
            let returned = registry.call::<u64>("inc", (*value,)).unwrap();
            prop_assert_eq!(returned, running);
        }

        prop_assert_eq!(registry.call_count("inc"), values.len());
        let history = registry.call_history("inc");
        for (index, value) in values.iter().enumerate() {
            prop_assert_eq!(&history[index], &CallRecord::new((*value,)));
            prop_assert_eq!(registry.call_record_at("inc", index).unwrap(), CallRecord::new((*value,)));
        }
        prop_assert!(registry.call_record_at("inc", values.len()).is_err());
        prop_assert_eq!(registry.last_call_record("inc").is_ok(), !values.is_empty());
    }

    #[test]
    fn test_was_called_with_iff_recorded(called in guest_names(), probe in "[A-Za-z]{0,8}") {
        let registry = StubRegistry::new(Greeter::new());
        for name in &called {
            registry.call::<String>("greet", (name.clone(),)).unwrap();
        }

        prop_assert_eq!(
            registry.was_called_with("greet", (probe.clone(),)),
            called.contains(&probe)
        );
    }

    #[test]
    fn test_untouched_methods_are_empty(name in unknown_method_name()) {
        let registry = StubRegistry::new(Counter::default());
        registry.call::<u64>("inc", (1u64,)).unwrap();

        prop_assert_eq!(registry.call_count(&name), 0);
        prop_assert!(registry.call_history(&name).is_empty());
        prop_assert!(!registry.is_stubbed(&name));
        prop_assert!(!registry.was_called_with(&name, ()));
    }
}
