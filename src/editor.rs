//! Editor-side plugin: exposes [`DlssSettings`] in the content browser.

use crate::{
    plugin::{PLUGIN_TYPE_NAME, PluginDescription},
    settings::DlssSettings,
};
use log::debug;
use std::{any, sync::Arc};

/// Maps an asset or settings type to its content browser representation.
pub trait AssetProxy: Send + Sync {
    /// Type of the asset this proxy creates.
    fn type_name(&self) -> &str;
    /// Display category in the content browser.
    fn category(&self) -> &str;
}

/// Host content database registry of asset proxies.
pub trait ContentDatabase {
    fn add_proxy(&mut self, proxy: Arc<dyn AssetProxy>);
    fn remove_proxy(&mut self, proxy: &Arc<dyn AssetProxy>);
}

/// Lifecycle of a plugin inside the editor.
///
/// The host calls [`Self::initialize_editor`] once at startup and [`Self::deinitialize`]
/// once at shutdown, in that order.
pub trait EditorPlugin {
    fn description(&self) -> &PluginDescription;
    /// Scripting type name of the runtime counterpart.
    fn game_plugin_type(&self) -> &'static str;
    fn initialize_editor(&mut self, content: &mut dyn ContentDatabase);
    fn deinitialize(&mut self, content: &mut dyn ContentDatabase);
}

/// Proxy for a JSON settings asset of a given type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomSettingsProxy {
    settings_type: &'static str,
    category: String,
}

impl CustomSettingsProxy {
    pub fn new<T: 'static>(category: impl Into<String>) -> Self {
        Self {
            settings_type: any::type_name::<T>(),
            category: category.into(),
        }
    }
}

impl AssetProxy for CustomSettingsProxy {
    fn type_name(&self) -> &str {
        self.settings_type
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// In-memory [`ContentDatabase`].
#[derive(Default)]
pub struct ProxyRegistry {
    proxies: Vec<Arc<dyn AssetProxy>>,
}

impl ProxyRegistry {
    pub fn proxies(&self) -> &[Arc<dyn AssetProxy>] {
        &self.proxies
    }

    /// Number of proxies registered for `type_name`.
    pub fn count_for(&self, type_name: &str) -> usize {
        self.proxies
            .iter()
            .filter(|proxy| proxy.type_name() == type_name)
            .count()
    }
}

impl ContentDatabase for ProxyRegistry {
    fn add_proxy(&mut self, proxy: Arc<dyn AssetProxy>) {
        self.proxies.push(proxy);
    }

    fn remove_proxy(&mut self, proxy: &Arc<dyn AssetProxy>) {
        self.proxies.retain(|p| !Arc::ptr_eq(p, proxy));
    }
}

/// DLSS plugin for the editor.
pub struct DlssEditor {
    description: PluginDescription,
    asset_proxy: Option<Arc<dyn AssetProxy>>,
}

impl Default for DlssEditor {
    fn default() -> Self {
        Self {
            description: PluginDescription::dlss(),
            asset_proxy: None,
        }
    }
}

impl DlssEditor {
    pub fn asset_proxy(&self) -> Option<&Arc<dyn AssetProxy>> {
        self.asset_proxy.as_ref()
    }
}

impl EditorPlugin for DlssEditor {
    fn description(&self) -> &PluginDescription {
        &self.description
    }

    fn game_plugin_type(&self) -> &'static str {
        PLUGIN_TYPE_NAME
    }

    fn initialize_editor(&mut self, content: &mut dyn ContentDatabase) {
        let proxy: Arc<dyn AssetProxy> =
            Arc::new(CustomSettingsProxy::new::<DlssSettings>("DLSS"));
        content.add_proxy(Arc::clone(&proxy));
        debug!("Registered {} settings proxy", proxy.type_name());
        self.asset_proxy = Some(proxy);
    }

    fn deinitialize(&mut self, content: &mut dyn ContentDatabase) {
        if let Some(proxy) = self.asset_proxy.take() {
            content.remove_proxy(&proxy);
            debug!("Unregistered {} settings proxy", proxy.type_name());
        }
    }
}
