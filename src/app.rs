use dino_tray::{MenuItem, TrayConfig, TrayController, TrayEvent, TrayHandler, Win32Shell};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::WindowId;

#[derive(Debug, Clone, Copy)]
pub enum AppMessage {
    Tray(TrayEvent),
}

/// Forwards tray callbacks into the event loop.
struct ProxyHandler(EventLoopProxy<AppMessage>);

impl ProxyHandler {
    fn send(&self, event: TrayEvent) {
        if let Err(e) = self.0.send_event(AppMessage::Tray(event)) {
            tracing::error!("Failed to send `AppMessage::Tray`: {e}")
        }
    }
}

impl TrayHandler for ProxyHandler {
    fn on_left_click(&self) {
        self.send(TrayEvent::LeftClick);
    }

    fn on_menu_select(&self, item: MenuItem) {
        self.send(TrayEvent::MenuSelect(item));
    }
}

pub struct App {
    tray: TrayController<Win32Shell>,
    show_requests: usize,
}

impl App {
    pub fn new(proxy: EventLoopProxy<AppMessage>, config: TrayConfig) -> anyhow::Result<Self> {
        let icon = config.icon.clone();

        let tray = TrayController::new(Win32Shell, config)?;
        tray.set_handler(ProxyHandler(proxy));
        tray.init()?;

        if let Some(icon) = icon {
            if let Err(e) = tray.set_icon_from_file(&icon) {
                tracing::warn!("Keeping the default tray icon: {e}");
            }
        }

        tray.add()?;

        Ok(Self {
            tray,
            show_requests: 0,
        })
    }

    fn handle_app_message(
        &mut self,
        event_loop: &ActiveEventLoop,
        message: &AppMessage,
    ) -> anyhow::Result<()> {
        match message {
            AppMessage::Tray(TrayEvent::LeftClick)
            | AppMessage::Tray(TrayEvent::MenuSelect(MenuItem::ShowApp)) => {
                self.show_requests += 1;
                tracing::info!("Show requested ({} so far)", self.show_requests);
            }

            AppMessage::Tray(TrayEvent::MenuSelect(MenuItem::Exit)) => {
                tracing::info!("Exit requested, removing tray icon");
                self.tray.remove()?;
                event_loop.exit();
            }
        }

        Ok(())
    }
}

impl ApplicationHandler<AppMessage> for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppMessage) {
        if let Err(e) = self.handle_app_message(event_loop, &event) {
            tracing::error!("Error while handling AppMessage: {e}")
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        _event: WindowEvent,
    ) {
    }
}

pub fn run() -> anyhow::Result<()> {
    let config = TrayConfig::load()?;

    let evl = EventLoop::<AppMessage>::with_user_event().build()?;

    let mut app = App::new(evl.create_proxy(), config)?;
    evl.run_app(&mut app)?;

    Ok(())
}
