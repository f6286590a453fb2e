//! Snowball Chase entry point
//!
//! Browser: binds the scene to the page's DOM and runs it on
//! requestAnimationFrame. Native: runs the scene headless and logs hits.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_scene {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, Window};

    use snowball_chase::platform::{FrameHandle, SceneHost, Sprite};
    use snowball_chase::sim::{AnchorId, AnchorProvider, PROJECTILE_COUNT, Rect, Target};
    use snowball_chase::{LoopDriver, SceneSettings};

    /// Element ids the page markup provides
    const CONTAINER_ID: &str = "global-chase";
    const DESK_ID: &str = "dev-scene";
    const TOGGLE_ID: &str = "anim-toggle";
    const CONFIG_ID: &str = "scene-config";
    const PRIMARY_HEAD_ID: &str = "thrower-node-head";
    const SECONDARY_HEAD_ID: &str = "thrower-mongo-head";
    const HIT_BADGE_TEXT: &str = "ayy";

    type Scene = Rc<RefCell<LoopDriver<DomHost>>>;

    /// DOM-backed scene host
    struct DomHost {
        window: Window,
        document: Document,
        /// Latest window size, written by the resize listener
        viewport: Rc<Cell<Vec2>>,
        resize_listener: Option<Closure<dyn FnMut(web_sys::Event)>>,
        /// Frame callback handed to requestAnimationFrame
        on_frame: Option<Closure<dyn FnMut(f64)>>,
    }

    impl DomHost {
        fn new(window: Window, document: Document) -> Self {
            let viewport = Rc::new(Cell::new(window_size(&window)));
            Self {
                window,
                document,
                viewport,
                resize_listener: None,
                on_frame: None,
            }
        }

        fn element(&self, id: &str) -> Option<HtmlElement> {
            self.document.get_element_by_id(id)?.dyn_into().ok()
        }

        fn sprite_element(&self, sprite: Sprite) -> Option<HtmlElement> {
            match sprite {
                Sprite::Actor(actor) => self.element(actor_id(actor)),
                Sprite::Projectile(index) => self.element(&format!("snowball-{}", index)),
            }
        }
    }

    fn actor_id(actor: Target) -> &'static str {
        match actor {
            Target::Chaser => "runner-chaser",
            Target::Runner => "runner-runaway",
        }
    }

    fn badge_id(actor: Target) -> &'static str {
        match actor {
            Target::Chaser => "hit-bubble-chaser",
            Target::Runner => "hit-bubble-runaway",
        }
    }

    fn window_size(window: &Window) -> Vec2 {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        Vec2::new(read(window.inner_width()), read(window.inner_height()))
    }

    fn now(window: &Window) -> f64 {
        window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    impl AnchorProvider for DomHost {
        fn anchor_rect(&self, id: AnchorId) -> Option<Rect> {
            let head = match id {
                AnchorId::Primary => PRIMARY_HEAD_ID,
                AnchorId::Secondary => SECONDARY_HEAD_ID,
            };
            let r = self.document.get_element_by_id(head)?.get_bounding_client_rect();
            Some(Rect::new(
                r.left() as f32,
                r.top() as f32,
                r.width() as f32,
                r.height() as f32,
            ))
        }
    }

    impl SceneHost for DomHost {
        fn sprites_mounted(&self) -> bool {
            let actors = [Target::Chaser, Target::Runner]
                .into_iter()
                .all(|a| self.sprite_element(Sprite::Actor(a)).is_some());
            let snowballs =
                (0..PROJECTILE_COUNT).all(|i| self.sprite_element(Sprite::Projectile(i)).is_some());
            actors && snowballs
        }

        fn viewport_size(&self) -> Vec2 {
            self.viewport.get()
        }

        fn watch_resize(&mut self) {
            self.unwatch_resize();
            self.viewport.set(window_size(&self.window));

            let window = self.window.clone();
            let cache = self.viewport.clone();
            let listener = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                cache.set(window_size(&window));
            });
            let _ = self
                .window
                .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
            self.resize_listener = Some(listener);
        }

        fn unwatch_resize(&mut self) {
            if let Some(listener) = self.resize_listener.take() {
                let _ = self
                    .window
                    .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
            }
        }

        fn request_frame(&mut self) -> Option<FrameHandle> {
            let on_frame = self.on_frame.as_ref()?;
            self.window
                .request_animation_frame(on_frame.as_ref().unchecked_ref())
                .ok()
                .map(FrameHandle)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            let _ = self.window.cancel_animation_frame(handle.0);
        }

        fn place(&mut self, sprite: Sprite, pos: Vec2) {
            if let Some(el) = self.sprite_element(sprite) {
                let transform = format!("translate3d({}px, {}px, 0)", pos.x, pos.y);
                let _ = el.style().set_property("transform", &transform);
            }
        }

        fn set_role(&mut self, actor: Target, role: &str) {
            if let Some(el) = self.sprite_element(Sprite::Actor(actor)) {
                let _ = el.set_attribute("data-role", role);
            }
        }

        fn show_reaction(&mut self, reacting: Option<Target>) {
            for actor in [Target::Chaser, Target::Runner] {
                if let Some(badge) = self.element(badge_id(actor)) {
                    let show = reacting == Some(actor);
                    badge.set_text_content(show.then_some(HIT_BADGE_TEXT));
                    let _ = badge.class_list().toggle_with_force("hidden", !show);
                }
            }
        }
    }

    /// Settings embedded in the page as JSON, or defaults
    fn load_settings(document: &Document) -> SceneSettings {
        let Some(json) = document
            .get_element_by_id(CONFIG_ID)
            .and_then(|el| el.text_content())
        else {
            return SceneSettings::default();
        };

        match SceneSettings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded scene settings from page");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring scene settings: {}", e);
                SceneSettings::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = load_settings(&document);
        let host = DomHost::new(window.clone(), document.clone());
        let scene: Scene = Rc::new(RefCell::new(LoopDriver::new(host, settings)));

        // The frame callback holds a weak handle so dropping the scene ends the loop
        let weak = Rc::downgrade(&scene);
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            if let Some(scene) = weak.upgrade() {
                scene.borrow_mut().frame(time);
            }
        });
        scene.borrow_mut().host_mut().on_frame = Some(on_frame);

        setup_toggle(scene.clone());
        set_enabled(&document, true);
        start(&scene, &window);

        // The scene lives as long as the page
        std::mem::forget(scene);
    }

    fn start(scene: &Scene, window: &Window) {
        if let Err(e) = scene.borrow_mut().start(now(window)) {
            log::debug!("Chase scene declined to start: {}", e);
        }
    }

    /// Show or hide the scene and relabel the toggle
    fn set_enabled(document: &Document, enabled: bool) {
        for id in [CONTAINER_ID, DESK_ID] {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", !enabled);
            }
        }
        if let Some(btn) = document.get_element_by_id(TOGGLE_ID) {
            btn.set_text_content(Some(if enabled {
                "Disable animation"
            } else {
                "Enable animation"
            }));
            let _ = btn.class_list().toggle_with_force("anim-toggle-pulse", enabled);
        }
    }

    fn setup_toggle(scene: Scene) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(btn) = document.get_element_by_id(TOGGLE_ID) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let running = scene.borrow().is_running();
                if running {
                    scene.borrow_mut().stop();
                    set_enabled(&document, false);
                    log::info!("Animation disabled");
                } else {
                    set_enabled(&document, true);
                    start(&scene, &window);
                    log::info!("Animation enabled");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_scene::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use snowball_chase::platform::HeadlessHost;
    use snowball_chase::sim::{SceneEvent, Target};
    use snowball_chase::{LoopDriver, SceneSettings};

    env_logger::init();
    log::info!("Snowball Chase (headless) starting...");

    // Optional JSON settings, e.g. SNOWBALL_CHASE_CONFIG='{"seed": 7}'
    let settings = match std::env::var("SNOWBALL_CHASE_CONFIG") {
        Ok(json) => SceneSettings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring SNOWBALL_CHASE_CONFIG: {}", e);
            SceneSettings::default()
        }),
        Err(_) => SceneSettings {
            seed: Some(42),
            ..Default::default()
        },
    };

    let host = HeadlessHost::with_throwers(Vec2::new(1280.0, 720.0));
    let mut driver = LoopDriver::new(host, settings);
    if let Err(e) = driver.start(0.0) {
        log::error!("Scene failed to start: {}", e);
        return;
    }

    // 30 seconds at 60 Hz
    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    let (mut chaser_hits, mut runner_hits) = (0u32, 0u32);
    while now < 30_000.0 && driver.host_mut().take_frame().is_some() {
        now += frame_ms;
        for event in driver.frame(now) {
            if let SceneEvent::Hit { projectile, target } = event {
                log::info!("{:>8.0} ms: snowball {} hit the {}", now, projectile, target.role());
                match target {
                    Target::Chaser => chaser_hits += 1,
                    Target::Runner => runner_hits += 1,
                }
            }
        }
    }

    if let Some(state) = driver.state() {
        println!(
            "After {} ticks: chaser at ({:.1}, {:.1}), runner at ({:.1}, {:.1})",
            state.ticks, state.chaser.pos.x, state.chaser.pos.y, state.runner.pos.x, state.runner.pos.y
        );
    }
    println!("Hits: chaser {}, runner {}", chaser_hits, runner_hits);
    driver.stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
