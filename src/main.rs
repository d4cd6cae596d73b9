//! Drop Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent};

    use drop_catch::audio::{AudioManager, cue_for_event};
    use drop_catch::platform::{InputState, Layout};
    use drop_catch::sim::{self, Droplet, GameEvent, GameState, RoundPhase};
    use drop_catch::{Difficulty, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        audio: AudioManager,
        /// Difficulty picked on the start overlay
        selected: Difficulty,
        /// DOM element per live droplet, keyed by droplet id
        elements: HashMap<u32, HtmlElement>,
        container: HtmlElement,
        catcher: HtmlElement,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, container: HtmlElement, catcher: HtmlElement) -> Self {
            let layout = measure_layout(&container, &catcher);
            let audio = AudioManager::new(&settings);
            Self {
                state: GameState::new(seed, settings, layout),
                input: InputState::default(),
                audio,
                selected: Difficulty::default(),
                elements: HashMap::new(),
                container,
                catcher,
            }
        }

        fn start(&mut self) {
            self.audio.resume();
            if sim::start_round(&mut self.state, self.selected, now()) {
                set_hidden("overlay", true);
                set_hidden("gameover-overlay", true);
            }
        }

        fn replay(&mut self) {
            sim::replay(&mut self.state);
            self.input.clear();
            set_hidden("gameover-overlay", true);
            set_hidden("overlay", false);
            self.sync_droplets();
            self.update_hud();
        }

        fn resize(&mut self) {
            let layout = measure_layout(&self.container, &self.catcher);
            sim::resize(&mut self.state, layout);
        }

        /// Run timers and the frame pass, then mirror state into the DOM
        fn update(&mut self, time: f64) {
            let input = self.input;
            sim::advance(&mut self.state, &input, time);

            for event in self.state.drain_events() {
                if let Some(effect) = cue_for_event(&event, &self.state.settings.round_end_cues) {
                    self.audio.play(effect);
                }
                if let GameEvent::RoundEnded { score, .. } = event {
                    if let Some(el) = element("gameover-score") {
                        el.set_text_content(Some(&score.to_string()));
                    }
                    set_hidden("gameover-overlay", false);
                }
            }

            self.sync_droplets();
            self.update_hud();
        }

        /// Create, move and remove droplet elements to match the collection
        fn sync_droplets(&mut self) {
            let live: Vec<u32> = self.state.droplets.iter().map(|d| d.id).collect();
            self.elements.retain(|id, el| {
                let keep = live.contains(id);
                if !keep {
                    el.remove();
                }
                keep
            });

            for droplet in &self.state.droplets {
                if !self.elements.contains_key(&droplet.id) {
                    let Some(el) = create_droplet_element(droplet) else {
                        continue;
                    };
                    let _ = self.container.append_child(&el);
                    self.elements.insert(droplet.id, el);
                }
                if let Some(el) = self.elements.get(&droplet.id) {
                    let _ = el
                        .style()
                        .set_property("top", &format!("{}px", droplet.top));
                }
            }

            let _ = self
                .catcher
                .style()
                .set_property("left", &format!("{}px", self.state.catcher.x));
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let round = &self.state.round;
            if let Some(el) = element("score") {
                el.set_text_content(Some(&round.score.to_string()));
            }
            if let Some(el) = element("lives") {
                el.set_text_content(Some(&round.lives.to_string()));
            }
            if let Some(el) = element("time") {
                el.set_text_content(Some(&round.time_left.to_string()));
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element(id: &str) -> Option<web_sys::Element> {
        document()?.get_element_by_id(id)
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = element(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn measure_layout(container: &HtmlElement, catcher: &HtmlElement) -> Layout {
        let viewport_width = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(container.offset_width() as f64);
        Layout {
            container_width: container.offset_width() as f32,
            container_height: container.offset_height() as f32,
            catcher_width: catcher.offset_width() as f32,
            catcher_height: catcher.offset_height() as f32,
            catcher_top: catcher.offset_top() as f32,
            viewport_width: viewport_width as f32,
        }
    }

    fn create_droplet_element(droplet: &Droplet) -> Option<HtmlElement> {
        let document = document()?;
        let wrapper: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        let class = if droplet.kind == sim::DropKind::Banana {
            "drop-wrapper banana-drop"
        } else {
            "drop-wrapper"
        };
        wrapper.set_class_name(class);
        let style = wrapper.style();
        style
            .set_property("left", &format!("{}px", droplet.spawn_x))
            .ok()?;
        style
            .set_property("top", &format!("{}px", droplet.top))
            .ok()?;

        let img: HtmlElement = document.create_element("img").ok()?.dyn_into().ok()?;
        img.set_class_name("drop-img");
        img.set_attribute("src", droplet.kind.image()).ok()?;
        img.set_attribute("alt", droplet.kind.label()).ok()?;
        img.set_attribute("draggable", "false").ok()?;
        img.style()
            .set_property("--drop-size", &format!("{}px", droplet.size))
            .ok()?;
        if droplet.rotation != 0 {
            img.style()
                .set_property("transform", &format!("rotate({}deg)", droplet.rotation))
                .ok()?;
        }
        wrapper.append_child(&img).ok()?;
        Some(wrapper)
    }

    /// Settings embedded in the page as `<script id="game-settings">`
    fn load_settings() -> Settings {
        match element("game-settings").and_then(|el| el.text_content()) {
            Some(json) => Settings::from_json_or_default(&json),
            None => {
                log::info!("Using default settings");
                Settings::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Drop Catch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let container: HtmlElement = document
            .get_element_by_id("game-container")
            .expect("no game container")
            .dyn_into()
            .expect("not an html element");
        let catcher: HtmlElement = document
            .get_element_by_id("bucket")
            .expect("no bucket")
            .dyn_into()
            .expect("not an html element");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, load_settings(), container, catcher)));
        game.borrow_mut().sync_droplets();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(&document, game.clone());

        request_animation_frame(game);

        log::info!("Drop Catch running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur releases held keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Re-measure and re-center on resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Difficulty buttons: <button class="difficulty-btn" data-difficulty="hard">
        if let Ok(buttons) = document.query_selector_all(".difficulty-btn") {
            for i in 0..buttons.length() {
                let Some(btn) = buttons
                    .item(i)
                    .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
                else {
                    continue;
                };
                let Some(difficulty) = btn
                    .get_attribute("data-difficulty")
                    .and_then(|name| Difficulty::from_str(&name))
                else {
                    log::warn!("Difficulty button without a valid data-difficulty");
                    continue;
                };
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().selected = difficulty;
                    log::info!("Difficulty selected: {}", difficulty.as_str());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Ok(Some(btn)) = document.query_selector(".play-again-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().replay();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if g.state.round.phase == RoundPhase::Running {
                g.update(time);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use drop_catch::platform::Layout;
    use drop_catch::sim::GameState;
    use drop_catch::{Difficulty, Settings};

    env_logger::init();
    log::info!("Drop Catch (native) starting...");
    log::info!("Native mode runs a headless autopilot round - build for wasm32 to play in the browser");

    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);

    let mut state = GameState::new(seed, Settings::default(), Layout::default());
    let summary = autopilot::run_round(&mut state, difficulty);
    println!(
        "{} round (seed {}): {:?}, score {}, lives {}, {} frames",
        difficulty.as_str(),
        seed,
        summary.outcome,
        summary.score,
        summary.lives,
        summary.frames
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use drop_catch::platform::InputState;
    use drop_catch::sim::{self, GameState, RoundOutcome};
    use drop_catch::Difficulty;

    /// ~60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop even if the round somehow never ends
    const MAX_FRAMES: u32 = 60 * 60;

    pub struct Summary {
        pub outcome: Option<RoundOutcome>,
        pub score: u32,
        pub lives: u8,
        pub frames: u32,
    }

    /// Steer toward the lowest clean droplet, away from bad ones overhead
    fn steer(state: &GameState) -> InputState {
        let catcher_center = state.catcher.x + state.layout.catcher_width * 0.4;
        let target = state
            .droplets
            .iter()
            .filter(|d| d.kind.is_good())
            .max_by(|a, b| a.top.total_cmp(&b.top))
            .map(|d| d.spawn_x + d.size / 2.0);

        match target {
            Some(x) if x < catcher_center - 4.0 => InputState {
                left: true,
                right: false,
            },
            Some(x) if x > catcher_center + 4.0 => InputState {
                left: false,
                right: true,
            },
            _ => InputState::default(),
        }
    }

    pub fn run_round(state: &mut GameState, difficulty: Difficulty) -> Summary {
        let mut now = 0.0;
        sim::start_round(state, difficulty, now);

        let mut frames = 0;
        while state.is_running() && frames < MAX_FRAMES {
            now += FRAME_MS;
            let input = steer(state);
            sim::advance(state, &input, now);
            for event in state.drain_events() {
                log::debug!("{:?}", event);
            }
            frames += 1;
        }

        Summary {
            outcome: state.round.outcome(),
            score: state.round.score,
            lives: state.round.lives,
            frames,
        }
    }
}
