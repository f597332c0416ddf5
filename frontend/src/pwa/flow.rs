use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use log::{debug, info, warn};
use yew::Callback;

use super::coordinator::{run_install, InstallCoordinator, InstallPrompt};
use crate::error::WebError;

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// The page-facing half of the install flow: banner and task spawning.
pub trait InstallHost {
    type Banner;

    fn show_banner(
        &self,
        app_name: &str,
        on_install: Callback<()>,
        on_dismiss: Callback<()>,
    ) -> Result<Self::Banner, WebError>;
    fn hide_banner(&self, banner: Self::Banner);
    fn spawn(&self, task: LocalTask);
}

/// Ties the coordinator to whatever banner the host puts on screen.
pub struct InstallFlow<P, H: InstallHost> {
    host: H,
    app_name: String,
    coordinator: RefCell<InstallCoordinator<P>>,
    banner: RefCell<Option<H::Banner>>,
}

impl<P, H> InstallFlow<P, H>
where
    P: InstallPrompt + 'static,
    H: InstallHost + 'static,
{
    pub fn new(host: H, app_name: String) -> Rc<Self> {
        Rc::new(Self {
            host,
            app_name,
            coordinator: RefCell::new(InstallCoordinator::new()),
            banner: RefCell::new(None),
        })
    }

    pub fn is_holding(&self) -> bool {
        self.coordinator.borrow().is_holding()
    }

    pub fn banner_visible(&self) -> bool {
        self.banner.borrow().is_some()
    }

    /// A fresh `beforeinstallprompt`, already default-prevented.
    pub fn offer(self: &Rc<Self>, prompt: P) {
        let show_banner = self.coordinator.borrow_mut().capture(prompt);
        if !show_banner {
            debug!("Install banner already showing, refreshed prompt");
            return;
        }

        let on_install = {
            let flow = self.clone();
            Callback::from(move |_: ()| flow.install())
        };
        let on_dismiss = {
            let flow = self.clone();
            Callback::from(move |_: ()| flow.dismiss())
        };
        match self.host.show_banner(&self.app_name, on_install, on_dismiss) {
            Ok(banner) => *self.banner.borrow_mut() = Some(banner),
            Err(e) => warn!("Could not show install banner: {}", e),
        }
    }

    fn remove_banner(&self) {
        let banner = self.banner.borrow_mut().take();
        if let Some(banner) = banner {
            self.host.hide_banner(banner);
        }
    }

    pub fn install(self: &Rc<Self>) {
        self.remove_banner();
        let flow = self.clone();
        self.host.spawn(Box::pin(async move {
            match run_install(&flow.coordinator).await {
                Some(Ok(outcome)) => info!("{}", outcome),
                Some(Err(e)) => warn!("Install prompt failed: {}", e),
                None => debug!("No install prompt held"),
            }
        }));
    }

    pub fn dismiss(&self) {
        self.remove_banner();
        self.coordinator.borrow_mut().dismiss();
    }

    pub fn installed(&self) {
        info!("{} PWA was installed", self.app_name);
        self.remove_banner();
        self.coordinator.borrow_mut().installed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pwa::coordinator::InstallOutcome;
    use futures::executor::block_on;

    struct FakePrompt(InstallOutcome);

    impl InstallPrompt for FakePrompt {
        async fn show(&self) -> Result<InstallOutcome, WebError> {
            Ok(self.0)
        }
    }

    #[derive(Default)]
    struct FakeHost {
        shown: RefCell<Vec<(Callback<()>, Callback<()>)>>,
        hidden: RefCell<Vec<usize>>,
        tasks: RefCell<Vec<LocalTask>>,
    }

    impl InstallHost for Rc<FakeHost> {
        type Banner = usize;

        fn show_banner(
            &self,
            app_name: &str,
            on_install: Callback<()>,
            on_dismiss: Callback<()>,
        ) -> Result<usize, WebError> {
            assert_eq!(app_name, "Healing Guru");
            let mut shown = self.shown.borrow_mut();
            shown.push((on_install, on_dismiss));
            Ok(shown.len() - 1)
        }

        fn hide_banner(&self, banner: usize) {
            self.hidden.borrow_mut().push(banner);
        }

        fn spawn(&self, task: LocalTask) {
            self.tasks.borrow_mut().push(task);
        }
    }

    fn flow() -> (Rc<FakeHost>, Rc<InstallFlow<FakePrompt, Rc<FakeHost>>>) {
        let host = Rc::new(FakeHost::default());
        let flow = InstallFlow::new(host.clone(), "Healing Guru".to_string());
        (host, flow)
    }

    fn click_install(host: &FakeHost, banner: usize) {
        let on_install = host.shown.borrow()[banner].0.clone();
        on_install.emit(());
    }

    fn click_later(host: &FakeHost, banner: usize) {
        let on_dismiss = host.shown.borrow()[banner].1.clone();
        on_dismiss.emit(());
    }

    #[test]
    fn repeat_offer_mounts_one_banner() {
        let (host, flow) = flow();
        flow.offer(FakePrompt(InstallOutcome::Accepted));
        flow.offer(FakePrompt(InstallOutcome::Dismissed));

        assert_eq!(host.shown.borrow().len(), 1);
        assert!(flow.banner_visible());
        assert!(flow.is_holding());
    }

    #[test]
    fn later_removes_banner_and_keeps_handle() {
        let (host, flow) = flow();
        flow.offer(FakePrompt(InstallOutcome::Accepted));
        click_later(&host, 0);

        assert_eq!(*host.hidden.borrow(), vec![0]);
        assert!(!flow.banner_visible());
        assert!(flow.is_holding());
        assert!(host.tasks.borrow().is_empty());
    }

    #[test]
    fn install_removes_banner_and_clears_handle() {
        let (host, flow) = flow();
        flow.offer(FakePrompt(InstallOutcome::Dismissed));
        click_install(&host, 0);

        assert_eq!(*host.hidden.borrow(), vec![0]);
        let tasks: Vec<LocalTask> = host.tasks.borrow_mut().drain(..).collect();
        assert_eq!(tasks.len(), 1);
        for task in tasks {
            block_on(task);
        }
        assert!(!flow.is_holding());
    }

    #[test]
    fn offer_after_later_shows_a_new_banner() {
        let (host, flow) = flow();
        flow.offer(FakePrompt(InstallOutcome::Accepted));
        click_later(&host, 0);
        flow.offer(FakePrompt(InstallOutcome::Accepted));

        assert_eq!(host.shown.borrow().len(), 2);
        assert!(flow.banner_visible());
    }

    #[test]
    fn appinstalled_takes_banner_down() {
        let (host, flow) = flow();
        flow.offer(FakePrompt(InstallOutcome::Accepted));
        flow.installed();

        assert_eq!(*host.hidden.borrow(), vec![0]);
        assert!(!flow.banner_visible());
        assert!(!flow.is_holding());
    }
}
