use crate::domain::ports::BillingListener;

/// Listener that reports backend lifecycle events to the log.
///
/// Calls await their own connection, so nothing else reacts to these events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingListener;

impl BillingListener for LoggingListener {
    fn on_connected(&self) {
        log::info!("Billing backend connected");
    }

    fn on_disconnected(&self) {
        log::info!("Billing backend disconnected");
    }

    fn on_purchase_flow_complete(&self, result: i32) {
        log::info!("Purchase flow complete with response code {}", result);
    }
}
