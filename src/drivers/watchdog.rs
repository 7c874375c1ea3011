//! Task Watchdog Timer (TWDT) driver.
//!
//! Wraps the ESP-IDF TWDT API to reset the device if the control loop
//! stalls for longer than `watchdog_timeout_ms`.  A stuck loop would
//! otherwise leave the relay in whatever state it was last driven to.
//!
//! The main loop must call `feed()` on every pass.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Initialise and subscribe the current task to the TWDT.
    pub fn new(timeout_ms: u32) -> Self {
        #[cfg(target_os = "espidf")]
        {
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    warn!("TWDT reconfigure returned {ret} (may already be configured)");
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK;
                if subscribed {
                    info!("Watchdog: subscribed ({timeout_ms} ms timeout, panic on trigger)");
                } else {
                    warn!("Watchdog: failed to subscribe ({ret})");
                }

                Self {
                    timeout_ms,
                    subscribed,
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("Watchdog(sim): {timeout_ms} ms, no-op");
            Self { timeout_ms }
        }
    }

    /// Feed the watchdog.  Must be called at least every `timeout_ms`.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}
