//! Deterministic stand-ins for the host collaborators

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use virtual_desktop_indicator::appearance::{
    AppearanceMode, ChangeNotifier, PreferenceError, PreferenceSource, SignalSink, Subscription,
    WatchError, WatchSignal,
};
use virtual_desktop_indicator::desktop::{
    DesktopIndex, DesktopIndexProvider, ProviderError, ProviderFactory,
};
use virtual_desktop_indicator::glyph::{Glyph, GlyphRenderer, IconSize, TextMask, TextRasterizer};
use virtual_desktop_indicator::{AppearanceWatcher, DesktopPoller};

/// Shared provider script: queued answers and acquisition count
#[derive(Default)]
pub struct DesktopScript {
    pub answers: VecDeque<Result<u32, &'static str>>,
    pub acquired: usize,
}

pub struct ScriptedFactory(pub Rc<RefCell<DesktopScript>>);

pub struct ScriptedProvider(Rc<RefCell<DesktopScript>>);

impl DesktopIndexProvider for ScriptedProvider {
    fn current(&mut self) -> Result<DesktopIndex, ProviderError> {
        match self.0.borrow_mut().answers.pop_front() {
            Some(Ok(index)) => Ok(DesktopIndex::new(index)),
            Some(Err(reason)) => Err(ProviderError::Unavailable(reason.to_string())),
            None => Err(ProviderError::Unavailable("no answer scripted".to_string())),
        }
    }
}

impl ProviderFactory for ScriptedFactory {
    type Provider = ScriptedProvider;

    fn acquire(&mut self) -> Result<ScriptedProvider, ProviderError> {
        self.0.borrow_mut().acquired += 1;
        Ok(ScriptedProvider(Rc::clone(&self.0)))
    }
}

/// Draws each character as a `px/2` wide, `px` tall block and records labels.
///
/// The measured box is one pixel taller than the ink, like a real line box.
pub struct BlockText {
    pub labels: Rc<RefCell<Vec<String>>>,
}

impl BlockText {
    pub fn cell_width(px: f32) -> i32 {
        (px / 2.0).floor() as i32
    }
}

impl TextRasterizer for BlockText {
    fn rasterize(&self, text: &str, px: f32) -> TextMask {
        self.labels.borrow_mut().push(text.to_string());

        let width = Self::cell_width(px) * text.chars().count() as i32;
        let mut mask = TextMask::blank(width as f32, px + 1.0);
        for col in 0..width {
            for row in 0..px as i32 {
                mask.set(col, row);
            }
        }
        mask
    }
}

/// Preference whose value the test flips; reads can be made to fail
#[derive(Clone)]
pub struct SharedPreference {
    pub mode: Rc<RefCell<Result<AppearanceMode, PreferenceError>>>,
}

impl SharedPreference {
    pub fn new(mode: AppearanceMode) -> Self {
        Self {
            mode: Rc::new(RefCell::new(Ok(mode))),
        }
    }

    pub fn set(&self, mode: AppearanceMode) {
        *self.mode.borrow_mut() = Ok(mode);
    }

    pub fn fail(&self) {
        *self.mode.borrow_mut() = Err(PreferenceError::Read("access denied".to_string()));
    }
}

impl PreferenceSource for SharedPreference {
    fn read_mode(&self) -> Result<AppearanceMode, PreferenceError> {
        self.mode.borrow().clone()
    }
}

/// Notifier that hands its sink to the test so signals can be fired from another thread
#[derive(Clone, Default)]
pub struct ManualNotifier {
    pub sink: Arc<Mutex<Option<SignalSink>>>,
    pub cancelled: Arc<Mutex<usize>>,
}

impl ManualNotifier {
    pub fn fire(&self, signal: WatchSignal) {
        if let Some(sink) = self.sink.lock().unwrap().as_ref() {
            sink(signal);
        }
    }
}

struct ManualSubscription(Arc<Mutex<usize>>);

impl Subscription for ManualSubscription {
    fn cancel(&mut self) {
        *self.0.lock().unwrap() += 1;
    }
}

impl ChangeNotifier for ManualNotifier {
    fn subscribe(&self, sink: SignalSink) -> Result<Box<dyn Subscription>, WatchError> {
        *self.sink.lock().unwrap() = Some(sink);
        Ok(Box::new(ManualSubscription(Arc::clone(&self.cancelled))))
    }
}

/// The UI-thread pipeline: poll, then render with the watcher's cached mode
pub struct Indicator {
    pub poller: DesktopPoller<ScriptedFactory>,
    pub watcher: AppearanceWatcher<SharedPreference>,
    pub renderer: GlyphRenderer<BlockText>,
    pub size: IconSize,
    pub script: Rc<RefCell<DesktopScript>>,
    pub labels: Rc<RefCell<Vec<String>>>,
    pub rendered: Vec<(DesktopIndex, Glyph)>,
}

impl Indicator {
    pub fn new(preference: SharedPreference, size: IconSize) -> Self {
        let script = Rc::new(RefCell::new(DesktopScript::default()));
        let labels = Rc::new(RefCell::new(Vec::new()));

        Self {
            poller: DesktopPoller::new(ScriptedFactory(Rc::clone(&script))),
            watcher: AppearanceWatcher::new(preference).expect("initial preference read"),
            renderer: GlyphRenderer::new(BlockText {
                labels: Rc::clone(&labels),
            }),
            size,
            script,
            labels,
            rendered: Vec::new(),
        }
    }

    pub fn answer(&self, answer: Result<u32, &'static str>) {
        self.script.borrow_mut().answers.push_back(answer);
    }

    pub fn tick(&mut self) {
        if let Some(index) = self.poller.tick() {
            let glyph = self.renderer.render(index, self.watcher.current(), self.size);
            self.rendered.push((index, glyph));
        }
    }

    pub fn acquired(&self) -> usize {
        self.script.borrow().acquired
    }

    pub fn last_label(&self) -> Option<String> {
        self.labels.borrow().last().cloned()
    }
}
