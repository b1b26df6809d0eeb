//! Fault capture - turn faulting code into a `Result`
//!
//! Adapters use these helpers to convert panics and errors from their
//! backends into values before the bound port sees them, typically into the
//! port's `{ok: false, msg}` reply via [`ack`].

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};

use futures::FutureExt;
use serde_json::{json, Value};
use thiserror::Error;

/// Failure arm of a captured call
#[derive(Debug, Error)]
pub enum Fault {
    #[error("panicked: {0}")]
    Panic(String),

    #[error(transparent)]
    Error(#[from] anyhow::Error),
}

impl Fault {
    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::debug!("Captured panic: {}", message);
        Fault::Panic(message)
    }
}

/// Run `f`, returning its value or the panic it raised
pub fn capture<T, F>(f: F) -> Result<T, Fault>
where
    F: FnOnce() -> T,
{
    catch_unwind(AssertUnwindSafe(f)).map_err(Fault::from_panic)
}

/// Run a fallible `f`; both `Err` and panics become a [`Fault`]
pub fn capture_result<T, F>(f: F) -> Result<T, Fault>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    capture(f)?.map_err(Fault::Error)
}

/// Lift `f` into a function that never panics
pub fn try_catch<A, T, F>(f: F) -> impl Fn(A) -> Result<T, Fault>
where
    F: Fn(A) -> T,
{
    move |arg| capture(|| f(arg))
}

/// Await a fallible future; both `Err` and panics become a [`Fault`]
pub async fn capture_async<T, Fut>(fut: Fut) -> Result<T, Fault>
where
    Fut: Future<Output = anyhow::Result<T>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result.map_err(Fault::Error),
        Err(payload) => Err(Fault::from_panic(payload)),
    }
}

/// Reply shape of write operations: `{ok: true}` or `{ok: false, msg}`
pub fn ack<E: fmt::Display>(result: Result<(), E>) -> Value {
    match result {
        Ok(()) => json!({"ok": true}),
        Err(e) => json!({"ok": false, "msg": e.to_string()}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_value() {
        assert_eq!(capture(|| 2 + 2).unwrap(), 4);
    }

    #[test]
    fn test_capture_panic() {
        let fault = capture(|| -> u32 { panic!("index exploded") }).unwrap_err();
        assert!(matches!(&fault, Fault::Panic(m) if m == "index exploded"));
        assert_eq!(fault.to_string(), "panicked: index exploded");
    }

    #[test]
    fn test_capture_result_error() {
        let fault = capture_result(|| -> anyhow::Result<()> { anyhow::bail!("disk full") })
            .unwrap_err();
        assert_eq!(fault.to_string(), "disk full");
    }

    #[test]
    fn test_try_catch() {
        let parse = try_catch(|s: &str| s.parse::<u32>().expect("not a number"));
        assert_eq!(parse("7").unwrap(), 7);
        let fault = parse("seven").unwrap_err();
        assert!(fault.to_string().contains("not a number"));
    }

    #[tokio::test]
    async fn test_capture_async() {
        let ok = capture_async(async { Ok::<_, anyhow::Error>(1) }).await;
        assert_eq!(ok.unwrap(), 1);

        let failed = capture_async(async {
            if true {
                panic!("backend gone");
            }
            Ok::<u8, anyhow::Error>(0)
        })
        .await;
        assert!(matches!(failed, Err(Fault::Panic(_))));
    }

    #[test]
    fn test_ack() {
        assert_eq!(ack::<String>(Ok(())), json!({"ok": true}));
        assert_eq!(
            ack(capture_result(|| -> anyhow::Result<()> { anyhow::bail!("nope") })),
            json!({"ok": false, "msg": "nope"})
        );
    }
}
