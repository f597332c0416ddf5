use web_sys::{Document, Element, MouseEvent};
use yew::prelude::*;
use yew::AppHandle;

use crate::error::WebError;

pub const BANNER_ID: &str = "install-banner";

#[derive(Properties, PartialEq)]
pub struct InstallBannerProps {
    pub app_name: String,
    pub on_install: Callback<MouseEvent>,
    pub on_dismiss: Callback<MouseEvent>,
}

pub fn banner_text(app_name: &str) -> String {
    format!("📱 Install {} on your phone for quick access", app_name)
}

#[function_component(InstallBanner)]
pub fn install_banner(props: &InstallBannerProps) -> Html {
    html! {
        <div style="position: fixed; bottom: 20px; left: 50%; transform: translateX(-50%);
                    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
                    color: white; padding: 15px 25px; border-radius: 12px;
                    box-shadow: 0 4px 12px rgba(0,0,0,0.3); z-index: 10000;
                    display: flex; align-items: center; gap: 15px; max-width: 90%;">
            <span>{banner_text(&props.app_name)}</span>
            <button onclick={props.on_install.clone()}
                style="background: white; color: #667eea; border: none; padding: 8px 16px;
                       border-radius: 6px; font-weight: 600; cursor: pointer;">
                {"Install"}
            </button>
            <button onclick={props.on_dismiss.clone()}
                style="background: transparent; color: white; border: 1px solid white;
                       padding: 8px 16px; border-radius: 6px; cursor: pointer;">
                {"Later"}
            </button>
        </div>
    }
}

/// A rendered banner attached to `<body>`.
pub struct MountedBanner {
    root: Element,
    app: AppHandle<InstallBanner>,
}

impl MountedBanner {
    pub fn mount(document: &Document, props: InstallBannerProps) -> Result<Self, WebError> {
        let body = document.body().ok_or(WebError::MissingElement("body"))?;
        let root = document.create_element("div")?;
        root.set_id(BANNER_ID);
        body.append_child(&root)?;

        let app = yew::Renderer::<InstallBanner>::with_root_and_props(root.clone(), props).render();
        Ok(Self { root, app })
    }

    pub fn remove(self) {
        self.app.destroy();
        self.root.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_names_the_app() {
        assert_eq!(
            banner_text("Healing Guru"),
            "📱 Install Healing Guru on your phone for quick access"
        );
    }
}
