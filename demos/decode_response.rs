//! Decoding Tesira responses and building command arguments.
//!
//! Run with: cargo run --example decode_response

use serde::{Deserialize, Serialize};
use std::error::Error;
use tesira_ttp::{deserialize_value, from_str, to_string, ttp, TtpValue};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeterUpdate {
    publish_token: String,
    value: Vec<f64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Scalar response behind a key
    let level = deserialize_value("\"value\":-10.500000")?;
    println!("Level: {} dB", level.as_f64()?);

    // Nested response, read dynamically
    let status = deserialize_value(
        "{\"hostname\":\"TesiraServer91\" \"networkInterfaceStatusWithName\":[{\"interfaceId\":\"control\" \"networkInterfaceStatus\":{\"ip\":\"192.168.1.10\" \"linkStatus\":LINK_1_GB}}]}",
    )?;
    println!("Host: {}", status.get("hostname")?.as_string()?);

    if let TtpValue::Array(interfaces) = status.get("networkInterfaceStatusWithName")? {
        for interface in interfaces {
            let details = interface.get("networkInterfaceStatus")?;
            println!(
                "  {}: {} ({})",
                interface.get("interfaceId")?.as_string()?,
                details.get("ip")?.as_string()?,
                details.get("linkStatus")?
            );
        }
    }

    // Subscription update into a typed struct
    let update: MeterUpdate =
        from_str("{\"publishToken\":\"MyLevels\" \"value\":[-100.000000 -12.500000]}")?;
    println!("{:?}", update);

    // Command arguments
    let argument = ttp!({"deviceId": 0, "classCode": 0, "instanceNum": 0});
    println!("Argument: {}", argument);
    println!("Encoded struct: {}", to_string(&update)?);

    Ok(())
}
