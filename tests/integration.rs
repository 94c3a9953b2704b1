//! End-to-end scenarios: whole UI ticks through [`Services`] with
//! scripted input sources, a counting renderer, and in-memory stores.

use menukit::config::{
    AUTOSAVE_THROTTLE_MS, BACK_LOCK_MS, PUSH_LOCK_MS, REPEAT_INITIAL_MS,
};
use menukit::gamepad::{
    GamepadSource, GamepadState, PadTransport, StatusLed, DPAD_LEFT, DPAD_RIGHT,
};
use menukit::input::{InputMapper, InputMode, InputSource, MechState, TouchSample};
use menukit::menu::{
    EditMenu, MenuFrame, MenuId, MenuItem, MenuRenderer, MenuStack, Orientation, Services,
};
use menukit::persist::{MemStore, SettingsDoc, SettingsStore};
use menukit::Error;

const SPEEDS: &[&str] = &["Slow", "Normal", "Fast"];

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Scripted input: tests mutate the fields between ticks.
#[derive(Default)]
struct Script {
    pad: GamepadState,
    mech: MechState,
    touch: Option<TouchSample>,
}

impl InputSource for Script {
    fn gamepad(&self) -> GamepadState {
        self.pad
    }
    fn mechanical(&self) -> MechState {
        self.mech
    }
    fn touch(&self) -> Option<TouchSample> {
        self.touch
    }
}

/// Renderer that records how often and with what it was called.
#[derive(Default)]
struct CountingRenderer {
    draws: usize,
    last_selected: usize,
    last_editing: bool,
    last_blink: bool,
}

impl MenuRenderer for CountingRenderer {
    fn draw_menu(&mut self, frame: &MenuFrame<'_>) {
        self.draws += 1;
        self.last_selected = frame.selected;
        self.last_editing = frame.editing;
        self.last_blink = frame.blink_on;
    }
}

/// Store that counts writes, for the autosave throttling scenario.
#[derive(Default)]
struct CountingStore {
    inner: MemStore,
    saves: usize,
}

impl SettingsStore for CountingStore {
    fn save(&mut self, path: &str, doc: &SettingsDoc) -> Result<(), Error> {
        self.saves += 1;
        self.inner.save(path, doc)
    }
    fn load(&mut self, path: &str) -> Result<SettingsDoc, Error> {
        self.inner.load(path)
    }
}

/// Everything a tick needs besides the menu itself.
struct Rig {
    mapper: InputMapper,
    input: Script,
    renderer: CountingRenderer,
    store: CountingStore,
    stack: MenuStack,
}

impl Rig {
    fn new() -> Self {
        init_logs();
        let mut stack = MenuStack::new();
        stack.set_root(MenuId(0));
        Self {
            mapper: InputMapper::new(),
            input: Script::default(),
            renderer: CountingRenderer::default(),
            store: CountingStore::default(),
            stack,
        }
    }
}

fn tick(menu: &mut EditMenu, now: u64, rig: &mut Rig) -> Option<usize> {
    menu.update(
        now,
        &mut Services {
            mapper: &mut rig.mapper,
            input: &rig.input,
            renderer: &mut rig.renderer,
            store: &mut rig.store,
            stack: &mut rig.stack,
        },
    )
}

fn carousel(n: usize) -> EditMenu {
    let mut m = EditMenu::new();
    for _ in 0..n {
        m.add_item(MenuItem::label("Item")).unwrap();
    }
    m
}

#[test]
fn held_direction_repeats_and_clamps_at_the_end() {
    let mut rig = Rig::new();
    let mut menu = carousel(3);
    rig.input.pad.connected = true;
    rig.input.pad.dpad = DPAD_RIGHT;

    // Immediate move on the fresh press, then nothing until the initial
    // repeat delay elapses.
    let mut now = 1000;
    while now < 1000 + REPEAT_INITIAL_MS {
        tick(&mut menu, now, &mut rig);
        now += 10;
    }
    assert_eq!(menu.selected(), 1);

    tick(&mut menu, now, &mut rig); // the delay boundary itself
    assert_eq!(menu.selected(), 2);

    // Keep holding well past the fast-repeat threshold: the selection
    // stays clamped on the last item, no wraparound.
    while now < 3000 {
        now += 10;
        tick(&mut menu, now, &mut rig);
    }
    assert_eq!(menu.selected(), 2);
}

#[test]
fn confirm_held_over_many_ticks_activates_once() {
    let mut rig = Rig::new();
    let mut menu = carousel(2);
    rig.input.pad.connected = true;
    rig.input.pad.a = true;

    let mut activations = 0;
    for i in 0..5 {
        if tick(&mut menu, 1000 + i * 10, &mut rig).is_some() {
            activations += 1;
        }
    }
    assert_eq!(activations, 1);

    // Release and re-press is a new edge.
    rig.input.pad.a = false;
    tick(&mut menu, 1100, &mut rig);
    rig.input.pad.a = true;
    assert_eq!(tick(&mut menu, 1110, &mut rig), Some(0));
}

#[test]
fn range_edit_flow_adjusts_and_clamps() {
    let mut rig = Rig::new();
    let mut menu = EditMenu::new();
    menu.add_item(MenuItem::range("Brightness", 75, 0, 100, 5)).unwrap();
    rig.input.pad.connected = true;

    // Activating the range item enters edit mode instead of reporting
    // the activation to the host.
    rig.input.pad.a = true;
    assert_eq!(tick(&mut menu, 1000, &mut rig), None);
    assert!(menu.in_editing());
    rig.input.pad.a = false;
    tick(&mut menu, 1010, &mut rig);

    // Each press/release pair steps once: 75 -> 70.
    let mut now = 1020;
    rig.input.pad.dpad = DPAD_LEFT;
    tick(&mut menu, now, &mut rig);
    assert_eq!(menu.item_value(0), 70);

    // 19 more pairs bottom out at the minimum and stay there.
    for _ in 0..19 {
        rig.input.pad.dpad = 0;
        now += 10;
        tick(&mut menu, now, &mut rig);
        rig.input.pad.dpad = DPAD_LEFT;
        now += 10;
        tick(&mut menu, now, &mut rig);
    }
    assert_eq!(menu.item_value(0), 0);
    assert!(menu.in_editing());

    // Back exits edit mode without popping the stack, and the held
    // level does not leak into browse mode next tick.
    rig.input.pad.dpad = 0;
    rig.input.pad.b = true;
    now += 10;
    tick(&mut menu, now, &mut rig);
    assert!(!menu.in_editing());
    assert_eq!(rig.stack.depth(), 1);
    now += 10;
    tick(&mut menu, now, &mut rig);
    assert_eq!(rig.stack.depth(), 1);
}

#[test]
fn array_edit_wraps_in_both_directions() {
    let mut rig = Rig::new();
    let mut menu = EditMenu::new();
    menu.add_item(MenuItem::array("Speed", SPEEDS, 2)).unwrap();
    rig.input.pad.connected = true;

    rig.input.pad.a = true;
    tick(&mut menu, 1000, &mut rig);
    assert!(menu.in_editing());
    rig.input.pad.a = false;
    tick(&mut menu, 1010, &mut rig);

    rig.input.pad.dpad = DPAD_RIGHT;
    tick(&mut menu, 1020, &mut rig);
    assert_eq!(menu.item_value(0), 0); // wrapped past the end

    rig.input.pad.dpad = 0;
    tick(&mut menu, 1030, &mut rig);
    rig.input.pad.dpad = DPAD_LEFT;
    tick(&mut menu, 1040, &mut rig);
    assert_eq!(menu.item_value(0), 2); // and back around
}

#[test]
fn submenu_push_and_pop_apply_input_locks() {
    let mut rig = Rig::new();
    let mut menus = [
        {
            let mut root = carousel(2);
            root.link_submenu(0, MenuId(1));
            root
        },
        carousel(3),
    ];
    rig.input.pad.connected = true;

    // Confirm on the linked item pushes the child and yields None.
    rig.input.pad.a = true;
    let cur = rig.stack.current().unwrap().0;
    assert_eq!(tick(&mut menus[cur], 1000, &mut rig), None);
    assert_eq!(rig.stack.depth(), 2);
    assert_eq!(rig.stack.current(), Some(MenuId(1)));
    rig.input.pad.a = false;

    // The push lock swallows held direction input in the child...
    rig.input.pad.dpad = DPAD_RIGHT;
    let mut now = 1010;
    while now < 1000 + PUSH_LOCK_MS {
        let cur = rig.stack.current().unwrap().0;
        tick(&mut menus[cur], now, &mut rig);
        now += 10;
    }
    assert_eq!(menus[1].selected(), 0);

    // ...and releases exactly at the deadline.
    let cur = rig.stack.current().unwrap().0;
    tick(&mut menus[cur], 1000 + PUSH_LOCK_MS, &mut rig);
    assert_eq!(menus[1].selected(), 1);
    rig.input.pad.dpad = 0;
    tick(&mut menus[1], 1160, &mut rig);

    // Back pops to the root and arms the back lock.
    rig.input.pad.b = true;
    tick(&mut menus[1], 1200, &mut rig);
    assert_eq!(rig.stack.depth(), 1);
    assert_eq!(rig.stack.current(), Some(MenuId(0)));
    rig.input.pad.b = false;
    tick(&mut menus[0], 1210, &mut rig);

    // Direction input held into the root is ignored until the lock expires.
    rig.input.pad.dpad = DPAD_RIGHT;
    let mut now = 1220;
    while now < 1200 + BACK_LOCK_MS {
        tick(&mut menus[0], now, &mut rig);
        now += 10;
    }
    assert_eq!(menus[0].selected(), 0);
    tick(&mut menus[0], 1200 + BACK_LOCK_MS, &mut rig);
    assert_eq!(menus[0].selected(), 1);
}

#[test]
fn returning_menu_redraws_after_a_pop() {
    let mut rig = Rig::new();
    let mut menus = [
        {
            let mut root = carousel(2);
            root.link_submenu(0, MenuId(1));
            root
        },
        carousel(1),
    ];
    rig.input.pad.connected = true;

    tick(&mut menus[0], 1000, &mut rig); // initial draw
    rig.input.pad.a = true;
    tick(&mut menus[0], 1010, &mut rig); // push
    rig.input.pad.a = false;
    tick(&mut menus[1], 1020, &mut rig); // child draws itself

    let before = rig.renderer.draws;
    rig.input.pad.b = true;
    tick(&mut menus[1], 1300, &mut rig); // pop
    rig.input.pad.b = false;

    // The root has no data change of its own, but the deferred redraw
    // flag from the pop forces a frame.
    tick(&mut menus[0], 1310, &mut rig);
    assert_eq!(rig.renderer.draws, before + 1);
    assert_eq!(rig.renderer.last_selected, 0);
}

#[test]
fn rapid_adjustments_coalesce_into_throttled_saves() {
    let mut rig = Rig::new();
    let mut menu = EditMenu::new();
    menu.add_item(MenuItem::range("Brightness", 75, 0, 100, 5)).unwrap();
    assert!(!menu.enable_autosave("/settings.json", &mut rig.store));
    rig.input.pad.connected = true;

    rig.input.pad.a = true;
    tick(&mut menu, 1000, &mut rig);
    assert!(menu.in_editing());
    rig.input.pad.a = false;
    tick(&mut menu, 1010, &mut rig);

    // 17 adjustments 20ms apart span just over one throttle window:
    // only the first and the first-past-the-window writes reach the store.
    let mut now = 1020;
    for _ in 0..17 {
        rig.input.pad.dpad = DPAD_LEFT;
        tick(&mut menu, now, &mut rig);
        now += 10;
        rig.input.pad.dpad = 0;
        tick(&mut menu, now, &mut rig);
        now += 10;
    }
    assert!(now - 1020 > AUTOSAVE_THROTTLE_MS);
    assert_eq!(rig.store.saves, 2);
    assert_eq!(menu.item_value(0), 0); // 75 - 17*5, clamped

    // A second identically shaped menu picks the persisted value up.
    let mut reloaded = EditMenu::new();
    reloaded.add_item(MenuItem::range("Brightness", 75, 0, 100, 5)).unwrap();
    assert!(reloaded.enable_autosave("/settings.json", &mut rig.store));
    assert_eq!(reloaded.item_value(0), 0);
}

#[test]
fn edit_blink_redraws_only_on_phase_flips() {
    let mut rig = Rig::new();
    let mut menu = EditMenu::new();
    menu.add_item(MenuItem::range("Brightness", 75, 0, 100, 5)).unwrap();
    rig.input.pad.connected = true;

    tick(&mut menu, 900, &mut rig); // flush the initial frame
    let base = rig.renderer.draws;

    rig.input.pad.a = true;
    tick(&mut menu, 1000, &mut rig);
    rig.input.pad.a = false;

    // Entering edit redraws once; the phase is high at 1010 (odd period).
    tick(&mut menu, 1010, &mut rig);
    assert_eq!(rig.renderer.draws, base + 1);
    assert!(rig.renderer.last_editing);
    assert!(rig.renderer.last_blink);

    // Idle ticks inside one phase produce no frames.
    for now in (1020..1200).step_by(10) {
        tick(&mut menu, now, &mut rig);
    }
    assert_eq!(rig.renderer.draws, base + 1);

    // The flip at the period boundary redraws exactly once more.
    tick(&mut menu, 1200, &mut rig);
    assert_eq!(rig.renderer.draws, base + 2);
    assert!(!rig.renderer.last_blink);
}

#[test]
fn vertical_menus_ignore_the_horizontal_axis() {
    let mut rig = Rig::new();
    let mut menu = carousel(3);
    menu.set_orientation(Orientation::Vertical);
    menu.set_input_mode(InputMode::Mech);

    rig.input.mech.left = true;
    tick(&mut menu, 1000, &mut rig);
    assert_eq!(menu.selected(), 0);

    rig.input.mech.left = false;
    rig.input.mech.down = true;
    tick(&mut menu, 1010, &mut rig);
    assert_eq!(menu.selected(), 1);
}

#[test]
fn touch_tap_activates_the_selection() {
    let mut rig = Rig::new();
    let mut menu = carousel(2);
    menu.set_input_mode(InputMode::Touch);

    rig.input.touch = Some(TouchSample { x: 50, y: 80, tap: true });
    assert_eq!(tick(&mut menu, 1000, &mut rig), Some(0));

    rig.input.touch = Some(TouchSample { x: 50, y: 80, tap: false });
    assert_eq!(tick(&mut menu, 1010, &mut rig), None);
}

// Gamepad transport fakes for the full input pipeline scenario.

struct FakeLink {
    connected: bool,
    accepting: bool,
    state: GamepadState,
}

impl PadTransport for FakeLink {
    fn connected(&self) -> bool {
        self.connected
    }
    fn set_accepting(&mut self, on: bool) {
        self.accepting = on;
    }
    fn sample(&self) -> GamepadState {
        self.state
    }
}

struct FakeLed {
    level: u8,
}

impl StatusLed for FakeLed {
    fn set_level(&mut self, level: u8) {
        self.level = level;
    }
}

#[test]
fn controller_snapshot_flows_through_to_the_menu() {
    let mut rig = Rig::new();
    let mut menu = carousel(3);

    let mut source = GamepadSource::new();
    let mut link = FakeLink {
        connected: true,
        accepting: false,
        state: GamepadState {
            connected: false, // the source stamps this, not the transport
            dpad: DPAD_RIGHT,
            ..GamepadState::NEUTRAL
        },
    };
    let mut led = FakeLed { level: 0 };

    source.poll(1000, false, &mut link, &mut led);
    rig.input.pad = *source.state();
    assert!(rig.input.pad.connected);

    tick(&mut menu, 1000, &mut rig);
    assert_eq!(menu.selected(), 1);

    // Link drop zeroes the snapshot; the held direction vanishes with it.
    link.connected = false;
    source.poll(1100, false, &mut link, &mut led);
    rig.input.pad = *source.state();
    tick(&mut menu, 1100, &mut rig);
    assert_eq!(menu.selected(), 1);
    assert!(!rig.input.pad.connected);
}
