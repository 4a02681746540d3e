use super::acknowledge::{self, AcknowledgeCall};
use super::callback::{DigitalGoodsCallback, discarding_callback, remote_callback};
use super::get_details::{self, GetDetailsCall};
use crate::domain::bundle::Bundle;
use crate::domain::ports::{BillingWrapperRef, RemoteCallbackRef};
use std::future::Future;
use tokio::runtime::Handle;

/// Key of the flag returned from [`DigitalGoodsRequestHandler::handle_extra_command`].
pub const EXTRA_COMMAND_SUCCESS: &str = "success";

/// Commands understood by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    GetDetails,
    Acknowledge,
}

impl CommandName {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            get_details::COMMAND_NAME => Some(CommandName::GetDetails),
            acknowledge::COMMAND_NAME => Some(CommandName::Acknowledge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::GetDetails => get_details::COMMAND_NAME,
            CommandName::Acknowledge => acknowledge::COMMAND_NAME,
        }
    }
}

/// Routes digital goods commands to the billing backend.
///
/// Accepted commands run on the given runtime; their response is delivered
/// later through the callback, independently of the value `handle` returns.
pub struct DigitalGoodsRequestHandler {
    wrapper: BillingWrapperRef,
    runtime: Handle,
}

impl DigitalGoodsRequestHandler {
    /// Creates a new handler.
    ///
    /// # Arguments
    ///
    /// * `wrapper` - The billing backend every command runs against.
    /// * `runtime` - Where accepted commands are spawned.
    pub fn new(wrapper: BillingWrapperRef, runtime: Handle) -> Self {
        Self { wrapper, runtime }
    }

    /// Entry point for commands arriving from another process.
    ///
    /// Always returns a bundle holding [`EXTRA_COMMAND_SUCCESS`].
    pub fn handle_extra_command(
        &self,
        command_name: &str,
        args: &Bundle,
        callback: Option<RemoteCallbackRef>,
    ) -> Bundle {
        let success = self.handle(command_name, args, callback.map(remote_callback));

        let mut bundle = Bundle::new();
        bundle.put_bool(EXTRA_COMMAND_SUCCESS, success);
        bundle
    }

    /// Returns `true` if the command was recognised and its arguments were
    /// valid. This says nothing about the outcome of the operation itself.
    pub fn handle(
        &self,
        command_name: &str,
        args: &Bundle,
        callback: Option<DigitalGoodsCallback>,
    ) -> bool {
        let Some(command) = CommandName::parse(command_name) else {
            log::debug!("Unknown command: {}", command_name);
            return false;
        };
        let callback = callback.unwrap_or_else(discarding_callback);

        match command {
            CommandName::GetDetails => match GetDetailsCall::create(args, callback) {
                Some(call) => self.spawn(call.call(self.wrapper.clone())),
                None => return false,
            },
            CommandName::Acknowledge => match AcknowledgeCall::create(args, callback) {
                Some(call) => self.spawn(call.call(self.wrapper.clone())),
                None => return false,
            },
        }

        log::debug!("Accepted {}", command.as_str());
        true
    }

    fn spawn<F>(&self, call: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Completion is reported through the callback.
        drop(self.runtime.spawn(call));
    }
}
