//! `iplocate lookup <ip>`

use colored::Colorize;

use crate::config::get_config;
use crate::interfaces::cli::CliError;
use crate::runtime::lifetime::startup::prepare_storage;
use crate::services::{LookupService, parse_ip_query};

pub async fn run_lookup(ip: String) -> Result<(), CliError> {
    // 先校验输入，无效地址不必连接数据库
    let query = parse_ip_query(Some(&ip)).map_err(|e| CliError::ParseError(e.to_string()))?;

    let config = get_config();
    let store = prepare_storage(&config.database).await?;
    let service = LookupService::new(store);

    match service.resolve(query.ip_id).await? {
        Some(location) => {
            let body = serde_json::to_string_pretty(&location)
                .map_err(|e| CliError::CommandError(e.to_string()))?;
            println!("{}", body);
        }
        None => println!("{} {}", query.ip.blue(), "Not found".yellow()),
    }
    Ok(())
}
