/// Initialize structured JSON logging for an embedding process. Safe to
/// call more than once; later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init();
}
