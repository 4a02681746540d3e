use clap::Parser;
use miette::{IntoDiagnostic, Result};
use playbilling::application::handler::{DigitalGoodsRequestHandler, EXTRA_COMMAND_SUCCESS};
use playbilling::application::listener::LoggingListener;
use playbilling::domain::ports::{BillingWrapperRef, RemoteCallbackRef};
use playbilling::infrastructure::in_memory::{Catalog, InMemoryBillingWrapper};
use playbilling::interfaces::channel::ChannelRemoteCallback;
use playbilling::interfaces::json::command_reader::{CommandReader, InboundCommand};
use playbilling::interfaces::json::response_writer::ResponseWriter;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog of items and owned purchases served by the billing backend (JSON)
    catalog: PathBuf,

    /// Commands to run, one JSON object per line. Reads stdin if omitted.
    #[arg(long)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = Catalog::from_reader(File::open(cli.catalog).into_diagnostic()?)
        .into_diagnostic()?;
    let wrapper: BillingWrapperRef = Arc::new(
        InMemoryBillingWrapper::from_catalog(catalog).with_listener(Arc::new(LoggingListener)),
    );
    let handler = DigitalGoodsRequestHandler::new(wrapper, Handle::current());

    let input: Box<dyn BufRead> = match cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path).into_diagnostic()?)),
        None => Box::new(io::stdin().lock()),
    };

    let (remote, mut responses) = ChannelRemoteCallback::new();
    let remote: RemoteCallbackRef = Arc::new(remote);

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    // Every accepted command answers exactly once.
    let mut pending = 0;
    for command in CommandReader::new(input).commands() {
        match command {
            Ok(InboundCommand { command, args }) => {
                let result = handler.handle_extra_command(&command, &args, Some(remote.clone()));
                if result.get_bool(EXTRA_COMMAND_SUCCESS).unwrap_or(false) {
                    pending += 1;
                }
                writer.write_result(&command, &result).into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    while pending > 0 {
        let Some((name, args)) = responses.recv().await else {
            break;
        };
        writer.write_callback(&name, &args).into_diagnostic()?;
        pending -= 1;
    }

    Ok(())
}
