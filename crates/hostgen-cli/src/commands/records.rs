use hostgen_state::HostnameRecord;

use crate::target::Portal;

pub async fn list(portal: &Portal, limit: Option<usize>, format: &str) -> anyhow::Result<()> {
    let records = portal.list(limit).await?;
    print!("{}", render_list(&records, format)?);
    Ok(())
}

pub async fn count(portal: &Portal) -> anyhow::Result<()> {
    println!("{}", portal.count().await?);
    Ok(())
}

pub async fn exists(portal: &Portal, hostname: &str) -> anyhow::Result<()> {
    if portal.exists(hostname).await? {
        println!("{hostname} exists");
    } else {
        println!("{hostname} is free");
    }
    Ok(())
}

fn render_list(records: &[HostnameRecord], format: &str) -> anyhow::Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(records)? + "\n"),
        "text" => {
            if records.is_empty() {
                return Ok("No hostnames stored.\n".to_string());
            }
            let mut out = format!(
                "{:<14} {:<4} {:<4} {:<10} {:<20}\n",
                "HOSTNAME", "ENV", "FN", "STATUS", "UPDATED"
            );
            for r in records {
                out.push_str(&format!(
                    "{:<14} {:<4} {:<4} {:<10} {:<20}\n",
                    r.hostname, r.environment, r.server_function, r.status, r.updatetime
                ));
            }
            Ok(out)
        }
        other => anyhow::bail!("Unknown format: {other}. Use 'text' or 'json'."),
    }
}
