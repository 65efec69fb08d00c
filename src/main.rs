use std::fmt::{Debug, Display};

use edarat_dms::core::{get_subscriber, init_subscriber, AppConfig};
use edarat_dms::dms_web_server::DmsWebServer;
use tokio::task::JoinError;

use colored::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new()?;

    let file_appender = tracing_appender::rolling::daily(&config.telemetry.log_dir, "app");
    let subscriber = get_subscriber("edarat_dms".into(), config.telemetry.level.clone(), file_appender);
    init_subscriber(subscriber);

    let dms_web_server = DmsWebServer::build(config.clone()).await?;
    let port = dms_web_server.port();

    let server_task = tokio::spawn(dms_web_server.run_until_stopped());

    println!("{}", "-----------------------------------------".green());
    println!("🚀 Server started on Addr: {}:{}", config.server.host, port);
    println!(
        "{}",
        format!("   {} users in the directory", config.directory.users.len()).dimmed()
    );
    println!("{}", "-----------------------------------------".green());

    tokio::select! {
        outcome = server_task => report_exit("edarat_dms_web_server", outcome),
    }
    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} task failed to complete",
                task_name
            )
        }
    }
}
