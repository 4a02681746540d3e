use crate::domain::bundle::Bundle;
use crate::domain::ports::RemoteCallbackRef;
use std::sync::Arc;

/// Receives the response of a command: the response name and its fields.
pub type DigitalGoodsCallback = Arc<dyn Fn(&str, Bundle) + Send + Sync>;

/// Wraps a remote callback so that responses are forwarded to the caller.
///
/// A failed delivery means the calling process crashed or was shut down;
/// there is nobody left to report it to, so it is dropped.
pub fn remote_callback(remote: RemoteCallbackRef) -> DigitalGoodsCallback {
    Arc::new(move |name: &str, args: Bundle| {
        if let Err(e) = remote.run_extra_callback(name, args) {
            log::debug!("Dropping {} response: {}", name, e);
        }
    })
}

/// Callback used when the caller did not provide one.
pub fn discarding_callback() -> DigitalGoodsCallback {
    Arc::new(|name: &str, _args: Bundle| {
        log::debug!("No callback for {} response", name);
    })
}
