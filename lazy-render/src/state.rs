/// Running counters for a renderer, useful for host diagnostics and tests.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderStats {
    pub passes: u64,
    pub elements_evaluated: u64,
    pub mutations_applied: u64,
    pub mutation_errors: u64,
    pub fades_started: u64,
    pub cleanups_run: u64,
}
