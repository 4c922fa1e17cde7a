//! Evasion scripts injected before any document in the session loads.
//!
//! Each script reads its knobs from `window.__fpConfig`, injected first by
//! `stealth::inject`. Scripts are self-contained and tolerate the config
//! object being absent.

pub const NAVIGATOR_WEBDRIVER_JS: &str = r"
    Object.defineProperty(Object.getPrototypeOf(navigator), 'webdriver', {
        get: () => false,
        configurable: true
    });
";

pub const NAVIGATOR_LANGUAGE_JS: &str = r"
    (() => {
        const cfg = window.__fpConfig || {};
        const languages = cfg.languages || ['en-US', 'en'];
        Object.defineProperty(navigator, 'languages', {
            get: () => languages,
            configurable: true
        });
        Object.defineProperty(navigator, 'platform', {
            get: () => cfg.platform || 'Win32',
            configurable: true
        });
    })();
";

pub const NAVIGATOR_PLUGINS_JS: &str = r"
    (() => {
        const pluginData = [
            {
                name: 'Chrome PDF Plugin',
                description: 'Portable Document Format',
                filename: 'internal-pdf-viewer'
            },
            {
                name: 'Chrome PDF Viewer',
                description: '',
                filename: 'mhjfbmdgcfjbbpaeojofohoefgiehjai'
            },
            {
                name: 'Native Client',
                description: '',
                filename: 'internal-nacl-plugin'
            }
        ];
        const pluginsProto = Object.getPrototypeOf(navigator.plugins);
        Object.defineProperty(navigator, 'plugins', {
            get: () => {
                const plugins = {};
                pluginData.forEach((plugin, i) => {
                    plugins[i] = plugin;
                    plugins[plugin.name] = plugin;
                });
                Object.setPrototypeOf(plugins, pluginsProto);
                Object.defineProperty(plugins, 'length', { value: pluginData.length });
                return plugins;
            },
            configurable: true
        });
    })();
";

pub const NAVIGATOR_PERMISSIONS_JS: &str = r"
    (() => {
        if (!navigator.permissions) return;
        const originalQuery = navigator.permissions.query.bind(navigator.permissions);
        navigator.permissions.query = (parameters) => {
            if (parameters && parameters.name === 'notifications') {
                return Promise.resolve({ state: Notification.permission });
            }
            return originalQuery(parameters);
        };
    })();
";

pub const HARDWARE_CONCURRENCY_JS: &str = r"
    (() => {
        const cfg = window.__fpConfig || {};
        Object.defineProperty(navigator, 'hardwareConcurrency', {
            get: () => cfg.hardwareConcurrency || 8,
            configurable: true
        });
    })();
";

pub const CHROME_RUNTIME_JS: &str = r"
    (() => {
        if (!window.chrome) {
            window.chrome = {};
        }
        if (!window.chrome.runtime) {
            window.chrome.runtime = {
                connect: () => ({
                    onMessage: { addListener: () => {}, removeListener: () => {} },
                    postMessage: () => {}
                })
            };
        }
        if (!window.chrome.app) {
            window.chrome.app = {
                isInstalled: false,
                InstallState: { DISABLED: 'disabled', INSTALLED: 'installed', NOT_INSTALLED: 'not_installed' },
                RunningState: { CANNOT_RUN: 'cannot_run', READY_TO_RUN: 'ready_to_run', RUNNING: 'running' }
            };
        }
    })();
";

pub const WEBGL_VENDOR_JS: &str = r"
    (() => {
        const cfg = window.__fpConfig || {};
        const vendor = cfg.webglVendor || 'Intel Inc.';
        const renderer = cfg.webglRenderer || 'Intel(R) UHD Graphics';
        const handler = {
            apply: function(target, ctx, args) {
                const param = (args && args[0]) || null;
                if (param === 37445) return vendor;   // UNMASKED_VENDOR_WEBGL
                if (param === 37446) return renderer; // UNMASKED_RENDERER_WEBGL
                return Reflect.apply(target, ctx, args);
            }
        };
        if (window.WebGLRenderingContext) {
            const getParameter = WebGLRenderingContext.prototype.getParameter;
            WebGLRenderingContext.prototype.getParameter = new Proxy(getParameter, handler);
        }
        if (window.WebGL2RenderingContext) {
            const getParameter2 = WebGL2RenderingContext.prototype.getParameter;
            WebGL2RenderingContext.prototype.getParameter = new Proxy(getParameter2, handler);
        }
    })();
";

pub const CANVAS_NOISE_JS: &str = r"
    (() => {
        const cfg = window.__fpConfig || {};
        const seed = cfg.sessionSeed || '00';
        let acc = 0;
        for (let i = 0; i < seed.length; i++) {
            acc = (acc * 31 + seed.charCodeAt(i)) >>> 0;
        }
        const offset = acc % 7;
        const originalToDataURL = HTMLCanvasElement.prototype.toDataURL;
        HTMLCanvasElement.prototype.toDataURL = function(...args) {
            const context = this.getContext('2d');
            if (context && this.width > 0 && this.height > 0) {
                const imageData = context.getImageData(0, 0, 1, 1);
                imageData.data[0] = (imageData.data[0] + offset) % 256;
                context.putImageData(imageData, 0, 0);
            }
            return originalToDataURL.apply(this, args);
        };
    })();
";
