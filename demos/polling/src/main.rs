//! Reads proximity and illuminance from a VCNL4020 in a polling loop.
//!
//! Takes the i2c-dev device path as its only argument, `/dev/i2c-1` by default.
//! Set `RUST_LOG=debug` to see the driver's own log messages.

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use embedded_hal::delay::DelayNs;
    use linux_embedded_hal::{Delay, I2cdev};
    use vcnl4020::{Config, Vcnl4020};

    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("/dev/i2c-1"));
    let mut i2c = I2cdev::new(&path)?;
    let mut delay = Delay;

    let mut sensor = Vcnl4020::new(&mut i2c, &Config::default())?;
    let id = sensor.product_revision()?;
    log::info!(
        "found VCNL4020 on {path} (product {}, revision {})",
        id.product,
        id.revision
    );

    loop {
        match sensor.read() {
            Ok(measurement) => println!(
                "Proximity: {:5} | Lux: {:8.2}",
                measurement.proximity(),
                measurement.lux()
            ),
            Err(err) if err.is_transient() => log::warn!("read failed, retrying: {err}"),
            Err(err) => return Err(err.into()),
        }

        delay.delay_ms(100);
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    eprintln!("this demo requires Linux with i2c-dev support");
}
