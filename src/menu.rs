use gpui::*;

use crate::grid::{
    ClearAll, Explain, FillAll, PosForm, Quit, Resimplify, SopForm, UseFourVariables,
    UseThreeVariables, UseTwoVariables,
};

/// Set up the application menu bar
pub fn setup_menu(cx: &mut App) {
    cx.set_menus(vec![
        Menu {
            name: "kmaps".into(),
            items: vec![
                MenuItem::action("About kmaps", About),
                MenuItem::separator(),
                MenuItem::action("Quit", Quit),
            ],
        },
        Menu {
            name: "Map".into(),
            items: vec![
                MenuItem::action("Clear All (0)", ClearAll),
                MenuItem::action("Fill All (1)", FillAll),
                MenuItem::separator(),
                MenuItem::action("Use 2 Variables", UseTwoVariables),
                MenuItem::action("Use 3 Variables", UseThreeVariables),
                MenuItem::action("Use 4 Variables", UseFourVariables),
            ],
        },
        Menu {
            name: "Form".into(),
            items: vec![
                MenuItem::action("Sum of Products", SopForm),
                MenuItem::action("Product of Sums", PosForm),
            ],
        },
        Menu {
            name: "Service".into(),
            items: vec![
                MenuItem::action("Re-run Simplification", Resimplify),
                MenuItem::action("Get Explanation", Explain),
            ],
        },
    ]);
}

// Menu-specific actions that don't fit elsewhere
actions!(menu, [About]);
