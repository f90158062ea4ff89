//! Browser control for real storefront runs.
//!
//! With the `browser` feature, [`ChromiumDriver`] implements
//! [`PageDriver`](crate::PageDriver) over the Chrome `DevTools` Protocol using
//! chromiumoxide. Locators are resolved by evaluating the JavaScript produced
//! by [`Locator::to_query`](crate::Locator::to_query).

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1366,
            viewport_height: 900,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// CDP key parameters for a named key: (code, virtual key code, text)
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
fn key_definition(key: &str) -> (String, i64, Option<String>) {
    match key {
        "Enter" => ("Enter".to_string(), 13, Some("\r".to_string())),
        "Tab" => ("Tab".to_string(), 9, None),
        "Escape" => ("Escape".to_string(), 27, None),
        _ => {
            let code = key
                .chars()
                .next()
                .map_or(0, |c| i64::from(u32::from(c.to_ascii_uppercase())));
            (key.to_string(), code, Some(key.to_string()))
        }
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
#[allow(clippy::significant_drop_tightening, clippy::missing_errors_doc)]
mod cdp {
    use super::{key_definition, BrowserConfig};
    use crate::driver::PageDriver;
    use crate::locator::Locator;
    use crate::result::{ShopError, ShopResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::input::{
        DispatchKeyEventParams, DispatchKeyEventType,
    };
    use chromiumoxide::layout::Point;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tracing::debug;

    #[derive(Debug, Deserialize)]
    struct Center {
        x: f64,
        y: f64,
    }

    fn driver_err(e: impl std::fmt::Display) -> ShopError {
        ShopError::driver(e.to_string())
    }

    /// Page driver backed by a real Chromium page
    #[derive(Debug)]
    pub struct ChromiumDriver {
        config: BrowserConfig,
        browser: Arc<Mutex<CdpBrowser>>,
        page: CdpPage,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl ChromiumDriver {
        /// Launch Chromium and open a blank page
        pub async fn launch(config: BrowserConfig) -> ShopResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder
                .build()
                .map_err(|message| ShopError::BrowserLaunch { message })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| ShopError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            // Spawn handler task
            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| ShopError::BrowserLaunch {
                    message: e.to_string(),
                })?;

            debug!(headless = config.headless, "chromium launched");
            Ok(Self {
                config,
                browser: Arc::new(Mutex::new(browser)),
                page,
                handle,
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub async fn close(self) -> ShopResult<()> {
            let mut browser = self.browser.lock().await;
            browser.close().await.map_err(driver_err)?;
            Ok(())
        }

        async fn eval<T: DeserializeOwned>(&self, expression: String) -> ShopResult<T> {
            self.page
                .evaluate_expression(expression)
                .await
                .map_err(driver_err)?
                .into_value()
                .map_err(driver_err)
        }

        /// Evaluate `body` with `el` bound to the target element; `null` when absent
        async fn with_element<T: DeserializeOwned>(
            &self,
            locator: &Locator,
            body: &str,
        ) -> ShopResult<Option<T>> {
            let expression = format!(
                "(() => {{ const el = {}; if (!el) return null; {body} }})()",
                locator.to_query()
            );
            self.eval(expression).await
        }

        async fn require<T: DeserializeOwned>(&self, locator: &Locator, body: &str) -> ShopResult<T> {
            self.with_element(locator, body)
                .await?
                .ok_or_else(|| ShopError::ElementNotFound {
                    selector: locator.to_string(),
                })
        }
    }

    #[async_trait]
    impl PageDriver for ChromiumDriver {
        async fn goto(&mut self, url: &str) -> ShopResult<()> {
            self.page
                .goto(url)
                .await
                .map_err(|e| ShopError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> ShopResult<String> {
            Ok(self
                .page
                .url()
                .await
                .map_err(driver_err)?
                .unwrap_or_default())
        }

        async fn all_text_contents(&self, locator: &Locator) -> ShopResult<Vec<String>> {
            self.eval(format!(
                "{}.map(el => el.textContent || '')",
                locator.to_query_all()
            ))
            .await
        }

        async fn text_content(&self, locator: &Locator) -> ShopResult<Option<String>> {
            self.require::<String>(locator, "return el.textContent || '';")
                .await
                .map(Some)
        }

        async fn is_visible(&self, locator: &Locator) -> ShopResult<bool> {
            let visible: Option<bool> = self
                .with_element(
                    locator,
                    "const s = getComputedStyle(el); const r = el.getBoundingClientRect(); \
                     return s.visibility !== 'hidden' && s.display !== 'none' && r.width > 0 && r.height > 0;",
                )
                .await?;
            Ok(visible.unwrap_or(false))
        }

        async fn is_enabled(&self, locator: &Locator) -> ShopResult<bool> {
            self.require(
                locator,
                "return !(el.disabled || el.getAttribute('aria-disabled') === 'true' || el.closest('fieldset:disabled'));",
            )
            .await
        }

        async fn is_checked(&self, locator: &Locator) -> ShopResult<bool> {
            self.require(
                locator,
                "const input = el.matches('input') ? el : el.closest('label')?.querySelector('input'); \
                 if (input) return !!input.checked; \
                 return el.getAttribute('aria-checked') === 'true';",
            )
            .await
        }

        async fn click(&mut self, locator: &Locator) -> ShopResult<()> {
            let center: Center = self
                .require(
                    locator,
                    "el.scrollIntoView({block: 'center', inline: 'center'}); \
                     const r = el.getBoundingClientRect(); \
                     const fe = el.ownerDocument.defaultView.frameElement; \
                     const o = fe ? fe.getBoundingClientRect() : {left: 0, top: 0}; \
                     return {x: o.left + r.left + r.width / 2, y: o.top + r.top + r.height / 2};",
                )
                .await?;
            self.page
                .click(Point {
                    x: center.x,
                    y: center.y,
                })
                .await
                .map_err(driver_err)?;
            Ok(())
        }

        async fn fill(&mut self, locator: &Locator, text: &str) -> ShopResult<()> {
            let body = format!(
                "el.focus(); el.value = {text:?}; \
                 el.dispatchEvent(new Event('input', {{bubbles: true}})); \
                 el.dispatchEvent(new Event('change', {{bubbles: true}})); return true;"
            );
            let _: bool = self.require(locator, &body).await?;
            Ok(())
        }

        async fn press(&mut self, locator: &Locator, key: &str) -> ShopResult<()> {
            let _: bool = self.require(locator, "el.focus(); return true;").await?;
            let (code, virtual_key, text) = key_definition(key);

            let mut down = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::KeyDown)
                .key(key.to_string())
                .code(code.clone())
                .windows_virtual_key_code(virtual_key);
            if let Some(text) = text {
                down = down.text(text);
            }
            let down = down.build().map_err(driver_err)?;
            self.page.execute(down).await.map_err(driver_err)?;

            let up = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::KeyUp)
                .key(key.to_string())
                .code(code)
                .windows_virtual_key_code(virtual_key)
                .build()
                .map_err(driver_err)?;
            self.page.execute(up).await.map_err(driver_err)?;
            Ok(())
        }

        async fn scroll_into_view(&mut self, locator: &Locator) -> ShopResult<()> {
            let _: bool = self
                .require(
                    locator,
                    "el.scrollIntoView({block: 'center', inline: 'nearest'}); return true;",
                )
                .await?;
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::ChromiumDriver;
