//! freebox-cli: 路由器管理接口的命令行工具
//!
//! Usage:
//!   freebox-cli api-version                          Query the router API version
//!   freebox-cli authorize <app-id> <name> <version>  Register an application
//!   freebox-cli login                                Show granted permissions
//!   freebox-cli rules                                List port forwarding rules
//!   freebox-cli vms                                  List virtual machines
//!   freebox-cli info <path>                          Show file info
//!   freebox-cli get <remote-path> <local-file>       Download a file
//!   freebox-cli put <local-file> <remote-dir>        Upload a file
//!   freebox-cli events                               Print VM events until interrupted

use anyhow::{bail, Context};
use freebox_client::session::{AuthorizationRequest, AuthorizationState};
use freebox_client::types::EventDescription;
use freebox_client::{Client, DEFAULT_API_VERSION};
use futures::TryStreamExt;
use std::env;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "api-version" => cmd_api_version().await,
        "authorize" => cmd_authorize(&args[2..]).await,
        "login" => cmd_login().await,
        "rules" => cmd_rules().await,
        "vms" => cmd_vms().await,
        "info" => cmd_info(&args[2..]).await,
        "get" => cmd_get(&args[2..]).await,
        "put" => cmd_put(&args[2..]).await,
        "events" => cmd_events().await,
        "version" | "--version" | "-V" => {
            println!("freebox-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"freebox-cli: Freebox OS 管理接口命令行工具

USAGE:
    freebox-cli <COMMAND> [ARGS]

COMMANDS:
    api-version                         Query the router API version
    authorize <app-id> <name> <version> Register an application and wait for approval
    login                               Log in and show granted permissions
    rules                               List port forwarding rules
    vms                                 List virtual machines
    info <path>                         Show file info
    get <remote-path> <local-file>      Download a file
    put <local-file> <remote-dir>       Upload a file
    events                              Print VM events until interrupted
    version                             Show version information
    help                                Show this help message

ENVIRONMENT:
    FREEBOX_ENDPOINT                    Router address (default mafreebox.freebox.fr)
    FREEBOX_API_VERSION                 API version segment (default v8)
    FREEBOX_APP_ID                      Registered application id
    FREEBOX_TOKEN                       Private token of the application
    RUST_LOG                            Log filter"#
    );
}

fn client_from_env() -> anyhow::Result<Client> {
    let endpoint =
        env::var("FREEBOX_ENDPOINT").unwrap_or_else(|_| "mafreebox.freebox.fr".to_string());
    let version =
        env::var("FREEBOX_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
    let mut builder = Client::builder(endpoint, version).timeout(None);
    if let Ok(app_id) = env::var("FREEBOX_APP_ID") {
        builder = builder.app_id(app_id);
    }
    if let Ok(token) = env::var("FREEBOX_TOKEN") {
        builder = builder.private_token(token);
    }
    Ok(builder.build()?)
}

async fn cmd_api_version() -> anyhow::Result<()> {
    let version = client_from_env()?.api_version().await?;
    println!("{} ({})", version.device_name, version.device_type);
    println!("api_version: {} -> {}", version.api_version, version.version_segment());
    if version.https_available {
        println!("https: {}:{}", version.api_domain, version.https_port);
    }
    Ok(())
}

async fn cmd_authorize(args: &[String]) -> anyhow::Result<()> {
    let [app_id, app_name, app_version] = args else {
        bail!("usage: freebox-cli authorize <app-id> <name> <version>");
    };
    let client = client_from_env()?;
    let device_name = env::var("HOSTNAME").unwrap_or_else(|_| "freebox-cli".to_string());
    let authorization = client
        .authorize(&AuthorizationRequest {
            app_id: app_id.clone(),
            app_name: app_name.clone(),
            app_version: app_version.clone(),
            device_name,
        })
        .await?;
    println!("Confirm the request on the router display...");

    loop {
        let status = client.authorization_status(authorization.track_id).await?;
        match status.status {
            AuthorizationState::Pending => tokio::time::sleep(Duration::from_secs(2)).await,
            AuthorizationState::Granted => {
                println!("FREEBOX_TOKEN={}", authorization.private_token.expose());
                return Ok(());
            }
            other => bail!("authorization ended with status {other:?}"),
        }
    }
}

async fn cmd_login() -> anyhow::Result<()> {
    let client = client_from_env()?;
    let permissions = client.login().await?;
    println!("{permissions:#?}");
    client.logout().await?;
    Ok(())
}

async fn cmd_rules() -> anyhow::Result<()> {
    let client = client_from_env()?;
    for rule in client.list_port_forwarding_rules().await? {
        let p = &rule.payload;
        println!(
            "#{:<4} {:?} wan {}-{} -> {}:{} enabled={} {}",
            rule.id,
            p.ip_proto,
            p.wan_port_start.unwrap_or_default(),
            p.wan_port_end.unwrap_or_default(),
            p.lan_ip.as_deref().unwrap_or("-"),
            p.lan_port.unwrap_or_default(),
            p.enabled.unwrap_or_default(),
            p.comment.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

async fn cmd_vms() -> anyhow::Result<()> {
    let client = client_from_env()?;
    for vm in client.list_virtual_machines().await? {
        println!(
            "#{:<3} {:<20} {:?} os={} disk={}",
            vm.id, vm.payload.name, vm.status, vm.payload.os, vm.payload.disk_path
        );
    }
    Ok(())
}

async fn cmd_info(args: &[String]) -> anyhow::Result<()> {
    let Some(path) = args.first() else {
        bail!("usage: freebox-cli info <path>");
    };
    let info = client_from_env()?.get_file_info(path).await?;
    println!("{info:#?}");
    Ok(())
}

async fn cmd_get(args: &[String]) -> anyhow::Result<()> {
    let [remote, local] = args else {
        bail!("usage: freebox-cli get <remote-path> <local-file>");
    };
    let file = client_from_env()?.get_file(remote).await?;
    let mut out = tokio::fs::File::create(local)
        .await
        .with_context(|| format!("cannot create {local}"))?;
    let mut stream = file.content.into_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.try_next().await? {
        out.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    out.flush().await?;
    println!("{} ({}) -> {local}: {written} bytes", file.file_name, file.content_type);
    Ok(())
}

async fn cmd_put(args: &[String]) -> anyhow::Result<()> {
    let [local, remote_dir] = args else {
        bail!("usage: freebox-cli put <local-file> <remote-dir>");
    };
    let name = std::path::Path::new(local)
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid file name {local}"))?;
    let mut input = tokio::fs::File::open(local)
        .await
        .with_context(|| format!("cannot open {local}"))?;

    let client = client_from_env()?;
    let mut upload = client.start_upload(remote_dir, name).await?;
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = input.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        upload.write(buf[..n].to_vec()).await?;
    }
    let id = upload.id();
    upload.finish().await?;
    println!("upload #{id} done");
    Ok(())
}

async fn cmd_events() -> anyhow::Result<()> {
    let client = client_from_env()?;
    let mut events = client
        .listen_events(&[
            EventDescription::vm_state_changed(),
            EventDescription::vm_disk_task_done(),
        ])
        .await?;
    while let Some(event) = events.recv().await {
        let event = event?;
        println!("{}: {}", event.description(), event.result);
    }
    Ok(())
}
