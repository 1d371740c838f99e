mod arg_parser;
mod installer_cli;

use arg_parser::{ArgParser, SubCommand};
use installer_cli::InstallerCli;
use jobinstall::{
    stage::{LogStage, SilentStage},
    RenderedJobRef,
};

use clap::Parser;
use std::error;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn error::Error>> {
    let args = ArgParser::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let cli = InstallerCli::new(args.jobs_dir, args.blobstore_dir);

    match args.sub_command {
        SubCommand::Install {
            name,
            version,
            blob_id,
            sha1,
        } => {
            let job_ref = RenderedJobRef::new(name, version, blob_id, sha1);
            if args.quiet {
                cli.install(job_ref, &SilentStage).await?;
            } else {
                cli.install(job_ref, &LogStage).await?;
            }
        }
        SubCommand::Cleanup { name } => {
            cli.cleanup(&name).await?;
        }
    }

    Ok(())
}
