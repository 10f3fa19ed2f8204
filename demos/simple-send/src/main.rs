use std::{fs::File, io::Read, time::Duration};

use argparse::{ArgumentParser, List, Store, StoreOption, StoreTrue};
use fcm_client::*;

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut to = String::new();
    let mut registration_ids: Vec<String> = Vec::new();
    let mut condition = String::new();
    let mut title: Option<String> = None;
    let mut body: Option<String> = None;
    let mut data_file: Option<String> = None;
    let mut ttl: Option<u32> = None;
    let mut timeout: Option<u64> = None;
    let mut dry_run = false;

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("An FCM sender. Keys are read from FCM_API_KEY and FCM_SERVER_KEY");

        ap.refer(&mut to)
            .add_option(&["--to"], Store, "Registration token or /topics/ name");

        ap.refer(&mut registration_ids)
            .add_option(&["-r", "--registration_id"], List, "Registration tokens for a multicast message");

        ap.refer(&mut condition)
            .add_option(&["-c", "--condition"], Store, "Topic condition, e.g. \"'a' in topics || 'b' in topics\"");

        ap.refer(&mut title).add_option(&["--title"], StoreOption, "Notification title");

        ap.refer(&mut body).add_option(&["--body"], StoreOption, "Notification body");

        ap.refer(&mut data_file)
            .add_option(&["-d", "--data_file"], StoreOption, "JSON file with a flat string map sent as data");

        ap.refer(&mut ttl)
            .add_option(&["-t", "--time_to_live"], StoreOption, "TTL of the message in seconds");

        ap.refer(&mut timeout)
            .add_option(&["--timeout"], StoreOption, "Request timeout in seconds");

        ap.refer(&mut dry_run)
            .add_option(&["--dry_run"], StoreTrue, "Validate without delivering");

        ap.parse_args_or_exit();
    }

    let message = Message {
        to,
        registration_ids,
        condition,
        time_to_live: ttl,
        dry_run,
        notification: title.map(|title| Notification::new(title, body.unwrap_or_default())),
        data: match data_file {
            Some(path) => {
                let mut contents = String::new();
                File::open(path)
                    .and_then(|mut file| file.read_to_string(&mut contents))
                    .unwrap();
                serde_json::from_str(&contents).unwrap()
            }
            None => Default::default(),
        },
        ..Default::default()
    };

    let config = match FcmConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            println!("ERROR in configuration: {}", error);
            return;
        }
    };

    let config = match timeout {
        Some(secs) => FcmConfig::builder(config.api_key(), config.server_key())
            .timeout(Duration::from_secs(secs))
            .build()
            .unwrap(),
        None => config,
    };

    let client = FcmClient::from_config(config).unwrap();

    match client.send(&message).await {
        Ok(SendResult::Multicast(result)) => {
            println!("Sent: {} ok, {} failed", result.success, result.failure);

            for (token, outcome) in message.registration_ids.iter().zip(result.results.iter()) {
                if let Some(ref error) = outcome.error {
                    println!("{}: {}", token, error);
                }
            }
        }
        Ok(SendResult::Topic(result)) => println!("Sent: {:?}", result),
        Err(error) => println!("Error: {}", error),
    }
}
