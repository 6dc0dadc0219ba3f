mod adapter;
mod client;
mod geometry;
mod grid;
mod layout;
mod menu;
mod palette;
mod sequence;
mod state;
mod theme;
mod view;

use gpui::*;
use tracing_subscriber::EnvFilter;

use grid::*;
use palette::*;
use theme::Theme;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        // Initialize theme
        Theme::init(cx);

        // Set up menu bar
        menu::setup_menu(cx);

        // Register keybindings
        cx.bind_keys([
            // Grid navigation
            KeyBinding::new("up", MoveUp, Some("MapGrid")),
            KeyBinding::new("down", MoveDown, Some("MapGrid")),
            KeyBinding::new("left", MoveLeft, Some("MapGrid")),
            KeyBinding::new("right", MoveRight, Some("MapGrid")),
            KeyBinding::new("k", MoveUp, Some("MapGrid")),
            KeyBinding::new("j", MoveDown, Some("MapGrid")),
            KeyBinding::new("h", MoveLeft, Some("MapGrid")),
            KeyBinding::new("l", MoveRight, Some("MapGrid")),

            // Cell editing
            KeyBinding::new("space", ToggleCell, Some("MapGrid")),
            KeyBinding::new("enter", ToggleCell, Some("MapGrid")),
            KeyBinding::new("c", ClearAll, Some("MapGrid")),
            KeyBinding::new("f", FillAll, Some("MapGrid")),

            // Variable count and form mode
            KeyBinding::new("2", UseTwoVariables, Some("MapGrid")),
            KeyBinding::new("3", UseThreeVariables, Some("MapGrid")),
            KeyBinding::new("4", UseFourVariables, Some("MapGrid")),
            KeyBinding::new("s", SopForm, Some("MapGrid")),
            KeyBinding::new("p", PosForm, Some("MapGrid")),

            // Simplification service
            KeyBinding::new("r", Resimplify, Some("MapGrid")),
            KeyBinding::new("e", Explain, Some("MapGrid")),

            // Command palette
            KeyBinding::new("cmd-k", ShowCommandPalette, Some("MapGrid")),
            KeyBinding::new("shift-;", ShowCommandPalette, Some("MapGrid")), // : key
            KeyBinding::new("escape", HideCommandPalette, Some("CommandPalette")),
            KeyBinding::new("up", SelectPrevious, Some("CommandPalette")),
            KeyBinding::new("down", SelectNext, Some("CommandPalette")),
            KeyBinding::new("enter", Confirm, Some("CommandPalette")),

            // Global
            KeyBinding::new("cmd-q", Quit, None),
        ]);

        // Register quit action
        cx.on_action::<Quit>(|_, cx| {
            cx.quit();
        });

        // Create the main window
        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.), px(840.)),
                cx,
            ))),
            titlebar: Some(TitlebarOptions {
                title: Some("kmaps".into()),
                appears_transparent: false,
                ..Default::default()
            }),
            window_min_size: Some(size(px(MIN_WINDOW_WIDTH), px(MIN_WINDOW_HEIGHT))),
            ..Default::default()
        };

        cx.open_window(window_options, |_window, cx| {
            cx.new(|cx| KmapApp::new(cx))
        })
        .unwrap();
    });
}
