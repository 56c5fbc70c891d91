#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

use esp_backtrace as _;
use esp_hal::{efuse::Efuse, timer::timg::TimerGroup};
use esp_println::logger::init_logger;

use koelkast_sensor::constants::VERSION;
use koelkast_sensor::{DeviceConfig, MacAddress};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    init_logger(log::LevelFilter::Info);

    let peripherals = esp_hal::init(esp_hal::Config::default());

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timg0.timer0);

    // Refuse to boot on an incomplete configuration
    let config = match DeviceConfig::from_build() {
        Ok(config) => config,
        Err(e) => panic!("Invalid device configuration: {}", e),
    };

    log::info!(
        "{} firmware v{} ({})",
        config.device_name(),
        VERSION,
        config.profile.board
    );
    log::info!(
        "DS18B20 on GPIO{}, BLE sensor {:X}",
        config.profile.probe_pin,
        config.profile.sensor_mac
    );
    log::info!(
        "Wi-Fi {:?}, telemetry {}",
        config.network.wifi_ssid,
        config.network.telemetry_endpoint
    );

    // Profile MACs are typed in by hand, flag the ones that don't match the chip
    let chip_mac = MacAddress::from(Efuse::read_base_mac_address());
    if !config.profile.matches_host(chip_mac) {
        log::warn!(
            "Profile {} expects host MAC {} but this chip reports {}",
            config.device_name(),
            config.profile.host_mac,
            chip_mac
        );
    }

    // Idle heartbeat at the configured measurement interval
    loop {
        log::info!(
            "Next cycle in {}s",
            config.defaults.sleep_duration_secs
        );
        Timer::after(Duration::from_secs(
            config.defaults.sleep_duration_secs.into(),
        ))
        .await;
    }
}
