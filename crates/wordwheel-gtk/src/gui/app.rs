use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::view::{self, Frame};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use wordwheel::input::{TimerToken, TokioTimer};
use wordwheel::settings::{self, LayoutSettings, Settings};
use wordwheel::{
    Candidate, ChannelHooks, Controller, InputAdapter, Point, PointerEvent, Size, WheelEvent,
};

/// Logical size used until the drawing area reports its real one.
pub const INITIAL_SIZE: Size = Size {
    width: 480.0,
    height: 720.0,
};

pub type Adapter = InputAdapter<TokioTimer<AppEvent>>;

pub fn build_adapter(
    settings: &Settings,
    words: Option<&[Candidate]>,
    handle: tokio::runtime::Handle,
    tx: &async_channel::Sender<AppEvent>,
) -> anyhow::Result<Adapter> {
    let config = settings.layout.derive(INITIAL_SIZE)?;
    let candidates = words
        .map(<[Candidate]>::to_vec)
        .unwrap_or_else(|| settings.ranked_candidates());
    let controller = Controller::new(config, candidates, ChannelHooks::new(tx.clone()))?;
    let timer = TokioTimer::new(handle, tx.clone());
    Ok(InputAdapter::new(controller, timer, INITIAL_SIZE))
}

pub struct AppInit {
    pub adapter: Adapter,
    pub layout: LayoutSettings,
    pub settings_path: PathBuf,
    pub words: Option<Vec<Candidate>>,
    pub tx: async_channel::Sender<AppEvent>,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    adapter: Adapter,
    frame: Rc<RefCell<Frame>>,
    layout: LayoutSettings,
    settings_path: PathBuf,
    words: Option<Vec<Candidate>>,
    tx: async_channel::Sender<AppEvent>,
    deferred_layout: Option<Size>,
    css: gtk::CssProvider,
    drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PointerEvent),
    Resize(Size),
    Timer(TimerToken),
    Wheel(WheelEvent),
    SettingsReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Timer(t) => AppMsg::Timer(t),
            AppEvent::Wheel(e) => AppMsg::Wheel(e),
            AppEvent::SettingsReload => AppMsg::SettingsReload,
        }
    }
}

fn drag_point(gesture: &gtk::GestureDrag, dx: f64, dy: f64) -> Point {
    let (x, y) = gesture.start_point().unwrap_or_default();
    Point::new(x + dx, y + dy)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Word Wheel"),
            set_default_size: (INITIAL_SIZE.width as i32, INITIAL_SIZE.height as i32),
            add_css_class: "wordwheel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Pointer(PointerEvent::Cancel(Point::default())));
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "wordwheel-area",
                add_css_class: theme::HIDDEN_CLASS,

                add_controller = gtk::GestureDrag {
                    set_button: 0, // any button or touch
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(PointerEvent::Down(Point::new(x, y))));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        sender.input(AppMsg::Pointer(PointerEvent::Move(drag_point(gesture, dx, dy))));
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        sender.input(AppMsg::Pointer(PointerEvent::Up(drag_point(gesture, dx, dy))));
                    },
                    connect_cancel[sender] => move |gesture, _| {
                        sender.input(AppMsg::Pointer(PointerEvent::Cancel(drag_point(gesture, 0.0, 0.0))));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            adapter,
            layout,
            settings_path,
            words,
            tx,
            rx,
        } = init;

        let config = adapter.controller().config().clone();
        let css = theme::load_css(config.hide_animation);

        let model = AppModel {
            adapter,
            frame: Rc::new(RefCell::new(Frame::new(config))),
            layout,
            settings_path,
            words,
            tx,
            deferred_layout: None,
            css,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.attach();

        let frame_draw = model.frame.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = view::draw(cr, &frame_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let resize_sender = sender.clone();
        widgets.drawing_area.connect_resize(move |_, w, h| {
            resize_sender.input(AppMsg::Resize(Size::new(w as f64, h as f64)));
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(event) => {
                self.adapter.handle(event);
                // a quick tap ends without a Hidden event
                if !self.adapter.is_touch_active() {
                    if let Some(size) = self.deferred_layout.take() {
                        self.relayout(size);
                    }
                }
            }
            AppMsg::Timer(token) => self.adapter.on_timer(token),
            AppMsg::Resize(size) => {
                self.adapter.set_surface_size(size);
                self.frame.borrow_mut().scale = self.adapter.scale();
                self.drawing_area.queue_draw();
                self.schedule_layout(size);
            }
            AppMsg::Wheel(event) => self.on_wheel_event(event),
            AppMsg::SettingsReload => self.reload_settings(),
        }
    }
}

impl AppModel {
    /// Points the renderer at the current controller. Needed after every rebuild.
    fn attach(&mut self) {
        let config = self.adapter.controller().config().clone();
        theme::update_css(&self.css, config.hide_animation);
        {
            let mut frame = self.frame.borrow_mut();
            frame.config = config;
            frame.scale = self.adapter.scale();
            frame.snapshot = None;
        }

        let frame = self.frame.clone();
        let area = self.drawing_area.clone();
        self.adapter.controller_mut().subscribe(move |snapshot| {
            if snapshot.is_on_screen() {
                frame.borrow_mut().snapshot = Some(snapshot.clone());
                area.remove_css_class(theme::HIDDEN_CLASS);
            } else {
                // keep the last frame so it can fade out
                area.add_css_class(theme::HIDDEN_CLASS);
            }
            area.queue_draw();
        });
    }

    /// Relayouts now, or once the current touch has finished.
    fn schedule_layout(&mut self, size: Size) {
        if self.adapter.is_touch_active() {
            self.deferred_layout = Some(size);
        } else {
            self.relayout(size);
        }
    }

    fn relayout(&mut self, size: Size) {
        let config = match self.layout.derive(size) {
            Ok(c) => c,
            Err(e) => {
                log::error!(
                    "Layout does not fit {}x{}: {}",
                    size.width,
                    size.height,
                    e
                );
                return;
            }
        };
        if config == *self.adapter.controller().config() && size == self.adapter.logical_size() {
            return;
        }

        match self
            .adapter
            .rebuild(config, size, ChannelHooks::new(self.tx.clone()))
        {
            Ok(()) => {
                log::info!("Wheel laid out for {}x{}", size.width, size.height);
                self.attach();
            }
            Err(e) => log::error!("Failed to rebuild wheel: {}", e),
        }
    }

    fn on_wheel_event(&mut self, event: WheelEvent) {
        match event {
            WheelEvent::WordSelected(candidate) => {
                log::info!("Selected '{}'", candidate.text);
                println!("{}", candidate.text);
            }
            WheelEvent::Haptic(pulse) => log::debug!("Haptic pulse: {}", pulse),
            WheelEvent::Activated => log::debug!("Wheel activated"),
            WheelEvent::Hidden => {
                if let Some(size) = self.deferred_layout.take() {
                    self.relayout(size);
                }
            }
        }
    }

    fn reload_settings(&mut self) {
        let settings = settings::load_or_default(Some(&self.settings_path));

        if self.words.is_none() {
            self.adapter
                .controller_mut()
                .update_words(settings.ranked_candidates());
        }

        if settings.layout != self.layout {
            self.layout = settings.layout;
            let size = self
                .deferred_layout
                .take()
                .unwrap_or_else(|| self.adapter.logical_size());
            self.schedule_layout(size);
        }
        log::info!("Settings reloaded");
    }
}
