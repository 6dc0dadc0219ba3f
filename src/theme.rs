use gpui::*;

#[cfg(target_os = "macos")]
use objc2::rc::Retained;
#[cfg(target_os = "macos")]
use objc2_app_kit::NSColor;

pub struct Theme {
    pub text: Rgba,
    pub subtext1: Rgba,
    pub subtext0: Rgba,
    pub surface1: Rgba,
    pub surface0: Rgba,
    pub base: Rgba,
    pub mantle: Rgba,
    pub accent: Rgba,

    /// Cell backgrounds per tri-state value.
    pub cell_zero: Rgba,
    pub cell_one: Rgba,
    pub cell_dont_care: Rgba,
    pub cell_one_text: Rgba,
    pub cell_dont_care_text: Rgba,
    /// Inert filler positions in the grid body.
    pub filler: Rgba,
    /// Staleness / failure indicator.
    pub warning: Rgba,
}

impl Global for Theme {}

/// Get the system accent color on macOS
#[cfg(target_os = "macos")]
fn get_system_accent_color() -> Rgba {
    let accent_color: Retained<NSColor> = NSColor::controlAccentColor();
    // Convert to sRGB color space
    if let Some(rgb_color) = accent_color
        .colorUsingColorSpace(objc2_app_kit::NSColorSpace::sRGBColorSpace().as_ref())
    {
        let r = rgb_color.redComponent() as f32;
        let g = rgb_color.greenComponent() as f32;
        let b = rgb_color.blueComponent() as f32;
        let a = rgb_color.alphaComponent() as f32;
        return rgba(
            ((r * 255.0) as u32) << 24
                | ((g * 255.0) as u32) << 16
                | ((b * 255.0) as u32) << 8
                | (a * 255.0) as u32,
        );
    }
    // Fallback to default blue
    gpui::blue().into()
}

#[cfg(not(target_os = "macos"))]
fn get_system_accent_color() -> Rgba {
    gpui::blue().into()
}

impl Theme {
    pub fn init(app: &mut App) {
        let theme = Theme::get_dark();
        app.set_global(theme);
    }

    // Catppuccin Mocha palette, with the peach/mauve entries repurposed for
    // the 1 and X cell states.
    pub fn get_dark() -> Theme {
        Theme {
            text: rgb(0xcdd6f4),
            subtext1: rgb(0xbac2de),
            subtext0: rgb(0xa6adc8),
            surface1: rgb(0x45475a),
            surface0: rgb(0x313244),
            base: rgb(0x1e1e2e),
            mantle: rgb(0x181825),
            accent: get_system_accent_color(),

            cell_zero: rgb(0x313244),
            cell_one: rgba(0xfab38733),
            cell_dont_care: rgba(0xcba6f733),
            cell_one_text: rgb(0xfab387),
            cell_dont_care_text: rgb(0xcba6f7),
            filler: rgb(0x181825),
            warning: rgb(0xf9e2af),
        }
    }

    /// Border color for a group overlay. The service tags groups with CSS
    /// class names like "border-red-500"; match on the color word and fall
    /// back to the accent for anything unknown.
    pub fn group_border(&self, color: &str) -> Rgba {
        const PALETTE: &[(&str, u32)] = &[
            ("red", 0xf38ba8ee),
            ("green", 0xa6e3a1ee),
            ("yellow", 0xf9e2afee),
            ("purple", 0xcba6f7ee),
            ("pink", 0xf5c2e7ee),
            ("blue", 0x89b4faee),
            ("orange", 0xfab387ee),
        ];
        for (name, value) in PALETTE {
            if color.contains(name) {
                return rgba(*value);
            }
        }
        self.accent
    }
}
