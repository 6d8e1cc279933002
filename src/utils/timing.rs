use std::time::Instant;

/// Run `f`, logging how long it took under `label`
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let output = f();
    tracing::debug!(
        label,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "timed"
    );
    output
}
