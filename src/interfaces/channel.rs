use crate::domain::bundle::Bundle;
use crate::domain::ports::RemoteCallback;
use crate::error::{BillingError, Result};
use tokio::sync::mpsc;

/// Remote callback that hands responses to an in-process receiver.
///
/// Delivery fails once the receiver has been dropped.
#[derive(Clone)]
pub struct ChannelRemoteCallback {
    sender: mpsc::UnboundedSender<(String, Bundle)>,
}

impl ChannelRemoteCallback {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, Bundle)>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl RemoteCallback for ChannelRemoteCallback {
    fn run_extra_callback(&self, callback_name: &str, args: Bundle) -> Result<()> {
        self.sender
            .send((callback_name.to_string(), args))
            .map_err(|_| BillingError::RemoteUnavailable(callback_name.to_string()))
    }
}
