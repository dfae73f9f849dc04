use super::method::{Callable, IntoStub, MethodTable, Override, Stubbable};
use super::validate::validate;
use crate::config::{Config, RegistryConfig};
use crate::logging;
use crate::report::{HistoryReport, MethodReport, ReportFormat};
use crate::signature::Signature;
use crate::value::{ArgValue, CallRecord, IntoArgs};
use crate::{Result, StubError};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Overrides and call history for one subject instance.
///
/// A method name is a key of `overrides` iff it is currently stubbed. Each
/// history list only grows, in record order, until explicitly reset.
struct RegistryState<S> {
    overrides: HashMap<String, Callable<S>>,
    history: HashMap<String, Vec<CallRecord>>,
}

/// Registry that stubs methods of a single subject and records every call
/// made through it.
///
/// All state lives behind one lock that is only ever held for map access,
/// never while an override or real method runs, so overrides may call back
/// into the registry.
pub struct StubRegistry<S> {
    subject: Arc<S>,
    subject_name: String,
    methods: MethodTable<S>,
    config: RegistryConfig,
    report_format: ReportFormat,
    state: Mutex<RegistryState<S>>,
}

impl<S: Stubbable> StubRegistry<S> {
    /// Create a registry for a subject that describes its own methods
    pub fn new(subject: S) -> Self {
        Self::from_arc(Arc::new(subject))
    }

    /// Create a registry for a subject shared with other code
    pub fn from_arc(subject: Arc<S>) -> Self {
        Self::with_methods(subject, S::method_table())
    }
}

impl<S: 'static> StubRegistry<S> {
    /// Create a registry from an explicit method table
    pub fn with_methods(subject: Arc<S>, methods: MethodTable<S>) -> Self {
        Self {
            subject,
            subject_name: short_type_name::<S>(),
            methods,
            config: RegistryConfig::default(),
            report_format: ReportFormat::default(),
            state: Mutex::new(RegistryState {
                overrides: HashMap::new(),
                history: HashMap::new(),
            }),
        }
    }

    /// Apply the `[registry]` and `[report]` sections of `config`
    pub fn with_config(mut self, config: &Config) -> Self {
        self.config = config.registry.clone();
        self.report_format = config.report.format;
        self
    }

    pub fn subject(&self) -> &Arc<S> {
        &self.subject
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Names of the subject's real methods, sorted
    pub fn method_names(&self) -> Vec<String> {
        self.methods.names().map(str::to_string).collect()
    }

    pub fn signature_of(&self, method: &str) -> Option<&Signature> {
        self.methods.get(method).map(Callable::signature)
    }

    pub(crate) fn methods(&self) -> &MethodTable<S> {
        &self.methods
    }

    fn state(&self) -> MutexGuard<'_, RegistryState<S>> {
        // Only short map operations run under the lock, so a poisoned
        // guard still holds consistent maps.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install `stub` in place of `method`, replacing any previous override.
    ///
    /// Nothing is installed when validation fails.
    pub fn install(&self, method: &str, stub: Override<S>) -> Result<()> {
        if let Err(e) = validate(&self.subject_name, &self.methods, method, &stub) {
            logging::log_override_rejected(&self.subject_name, method, &e.to_string());
            return Err(e);
        }

        let replaced = self
            .state()
            .overrides
            .insert(method.to_string(), stub.into_callable())
            .is_some();
        logging::log_override_installed(&self.subject_name, method, replaced);
        Ok(())
    }

    /// Install a typed function `Fn(&S, args..) -> R` in place of `method`
    pub fn stub<M>(&self, method: &str, f: impl IntoStub<S, M>) -> Result<()> {
        self.install(method, Override::new(f))
    }

    pub fn is_stubbed(&self, method: &str) -> bool {
        self.state().overrides.contains_key(method)
    }

    /// Remove the override for `method`, if any
    pub fn restore(&self, method: &str) {
        let was_stubbed = self.state().overrides.remove(method).is_some();
        logging::log_override_restored(&self.subject_name, method, was_stubbed);
    }

    /// Remove every override
    pub fn restore_all(&self) {
        let count = {
            let mut state = self.state();
            let count = state.overrides.len();
            state.overrides.clear();
            count
        };
        logging::log_overrides_cleared(&self.subject_name, count);
    }

    /// Currently stubbed method names, sorted
    pub fn stubbed_methods(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state().overrides.keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn override_for(&self, method: &str) -> Option<Callable<S>> {
        self.state().overrides.get(method).cloned()
    }

    pub(crate) fn record(&self, method: &str, args: Vec<ArgValue>) {
        let capacity = self.config.history_capacity.unwrap_or(0);
        self.state()
            .history
            .entry(method.to_string())
            .or_insert_with(|| Vec::with_capacity(capacity))
            .push(CallRecord::new(args));
    }

    /// Snapshot of every recorded call to `method`, in record order
    pub fn call_history(&self, method: &str) -> Vec<CallRecord> {
        self.state()
            .history
            .get(method)
            .cloned()
            .unwrap_or_default()
    }

    pub fn call_record_at(&self, method: &str, index: usize) -> Result<CallRecord> {
        let state = self.state();
        let calls = state.history.get(method).map(Vec::as_slice).unwrap_or(&[]);
        calls
            .get(index)
            .cloned()
            .ok_or_else(|| StubError::IndexOutOfRange {
                method: method.to_string(),
                index,
                len: calls.len(),
            })
    }

    pub fn last_call_record(&self, method: &str) -> Result<CallRecord> {
        self.state()
            .history
            .get(method)
            .and_then(|calls| calls.last().cloned())
            .ok_or_else(|| StubError::NoCallsRecorded {
                method: method.to_string(),
            })
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state().history.get(method).map_or(0, Vec::len)
    }

    /// Whether some recorded call to `method` equals `args` element-wise
    pub fn was_called_with(&self, method: &str, args: impl IntoArgs) -> bool {
        let args = args.into_args();
        self.state()
            .history
            .get(method)
            .is_some_and(|calls| calls.iter().any(|call| call.matches(&args)))
    }

    /// Clear the recorded calls of `method`
    pub fn reset_history(&self, method: &str) {
        let cleared = self
            .state()
            .history
            .remove(method)
            .map_or(0, |calls| calls.len());
        logging::log_history_reset(&self.subject_name, Some(method), cleared);
    }

    /// Clear the recorded calls of every method
    pub fn reset_all_history(&self) {
        let cleared = {
            let mut state = self.state();
            let cleared = state.history.values().map(Vec::len).sum();
            state.history.clear();
            cleared
        };
        logging::log_history_reset(&self.subject_name, None, cleared);
    }

    /// Serializable snapshot of stub state and history for every method that
    /// is known, stubbed or called
    pub fn report(&self) -> HistoryReport {
        let state = self.state();
        let names: BTreeSet<&str> = self
            .methods
            .names()
            .chain(state.overrides.keys().map(String::as_str))
            .chain(state.history.keys().map(String::as_str))
            .collect();

        let methods = names
            .into_iter()
            .map(|name| {
                let calls = state.history.get(name).map(Vec::as_slice).unwrap_or(&[]);
                MethodReport {
                    method: name.to_string(),
                    stubbed: state.overrides.contains_key(name),
                    call_count: calls.len(),
                    calls: calls
                        .iter()
                        .map(|call| call.args().iter().map(|arg| format!("{:?}", arg)).collect())
                        .collect(),
                }
            })
            .collect();

        HistoryReport {
            subject: self.subject_name.clone(),
            methods,
        }
    }

    /// Render [`Self::report`] in the configured format
    pub fn render_report(&self) -> Result<String> {
        self.report().render(self.report_format)
    }
}

/// `my_crate::module::Type<other::Arg>` becomes `Type<other::Arg>`.
fn short_type_name<S: ?Sized>() -> String {
    let full = std::any::type_name::<S>();
    let (path, generics) = match full.find('<') {
        Some(split) => full.split_at(split),
        None => (full, ""),
    };
    let base = path.rsplit("::").next().unwrap_or(path);
    format!("{}{}", base, generics)
}
