#![warn(rust_2018_idioms)]

use std::path::PathBuf;

use structopt::StructOpt;

use rostr::error::Error;
use rostr::settings::Settings;
use rostr::store::Store;
use rostr::{keychain, lookup, roster, url};

#[derive(Debug, StructOpt)]
struct CliOptions {
    #[structopt(short, long)]
    debug: bool,

    /// optional settings file
    #[structopt(short, long, parse(from_os_str))]
    conf: Option<PathBuf>,

    /// print the roster
    #[structopt(long)]
    clients: bool,

    /// append a client with this email
    #[structopt(long)]
    add_client: Option<String>,

    /// drop the first client with this email
    #[structopt(long)]
    remove_client: Option<String>,

    /// print the shareable URL for this email
    #[structopt(long)]
    get_url: Option<String>,

    /// print the server keypair
    #[structopt(long)]
    keychain: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli_opt = CliOptions::from_args();
    if cli_opt.debug {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = Settings::load(cli_opt.conf.as_deref())?;
    let store = Store::new(&settings.config_path);
    let mut doc = store.load()?;

    // one command per run, first matching flag wins

    if cli_opt.clients {
        let clients = doc.clients()?;
        println!("Clients ({}):", clients.len());
        for (idx, email, id) in roster::list(clients) {
            println!("[{}] {}: {}", idx, email, id);
        }
        return Ok(());
    }

    if let Some(email) = &cli_opt.add_client {
        let client = roster::add(doc.clients_mut()?, email);
        // the roster changed in memory; a failed persist must not report success
        store.save(&doc)?;
        println!("Client added: {} ({})", email, client.id);
        return Ok(());
    }

    if let Some(email) = &cli_opt.remove_client {
        match roster::remove(doc.clients_mut()?, email) {
            Ok(removed) => {
                store.save(&doc)?;
                println!("Client removed: {}", removed.email);
            }
            Err(Error::NotFound(_)) => println!("Client not found: {}", email),
            Err(err) => return Err(err.into()),
        }
        return Ok(());
    }

    if let Some(email) = &cli_opt.get_url {
        let reality = doc.reality()?;
        let short_id = reality
            .short_ids
            .first()
            .ok_or_else(|| Error::ConfigShape("realitySettings.shortIds is empty".to_string()))?;
        match roster::find_by_email(doc.clients()?, email) {
            Ok(client) => {
                let keys = keychain::derive(&settings.xray_binary, &reality.private_key).await?;
                let ip = lookup::resolve_ip(&settings.lookup_url).await?;
                println!("{}: {}", client.email, client.id);
                println!("{}", url::compose(client, &ip, &keys.public, short_id));
            }
            Err(Error::NotFound(_)) => println!("Client not found: {}", email),
            Err(err) => return Err(err.into()),
        }
        return Ok(());
    }

    if cli_opt.keychain {
        let reality = doc.reality()?;
        let keys = keychain::derive(&settings.xray_binary, &reality.private_key).await?;
        println!("Public key: {}\nPrivate key: {}", keys.public, keys.private);
        return Ok(());
    }

    // no command flag: load succeeded, nothing to do
    log::debug!("no command requested");
    Ok(())
}
