use crate::common::Counter;
use crate::utils::{increments, unknown_method_name};
use method_stub::{StubError, StubRegistry};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_override_result_replaces_real_result(values in increments(), offset in 0u64..1_000) {
        let registry = StubRegistry::new(Counter::default());
        registry
            .stub("inc", move |_: &Counter, by: u64| by + offset)
            .unwrap();

        for value in &values {
            prop_assert_eq!(registry.call::<u64>("inc", (*value,)).unwrap(), value + offset);
        }
        prop_assert_eq!(registry.call_count("inc"), values.len());
        prop_assert_eq!(registry.subject().get(), 0);
    }

    #[test]
    fn test_install_unknown_method_changes_nothing(name in unknown_method_name()) {
        let registry = StubRegistry::new(Counter::default());
        let err = registry.stub(&name, |_: &Counter| 0u64).unwrap_err();

        prop_assert!(
            matches!(err, StubError::InvalidOverride { .. }),
            "unexpected error: {:?}",
            err
        );
        prop_assert!(!registry.is_stubbed(&name));
        prop_assert!(registry.stubbed_methods().is_empty());
    }

    #[test]
    fn test_dispatch_unknown_method_fails(name in unknown_method_name(), value in any::<u64>()) {
        let registry = StubRegistry::new(Counter::default());
        let err = registry.dispatch(&name, (value,)).unwrap_err();

        prop_assert!(
            matches!(err, StubError::NoSuchMethod { .. }),
            "unexpected error: {:?}",
            err
        );
        prop_assert_eq!(registry.call_count(&name), 0);
    }
}
