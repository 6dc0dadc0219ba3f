use gpui::prelude::FluentBuilder;
use gpui::*;
use tracing::warn;

use crate::adapter::{self, SimplificationResult, MISSING_EXPRESSION};
use crate::client::{SimplifyClient, SimplifyRequest};
use crate::geometry::{
    self, CELL_SIZE, COLUMN_HEADER_HEIGHT, GAP_SIZE, GRID_PADDING, ROW_HEADER_WIDTH,
};
use crate::palette::{CommandPalette, HideCommandPalette, ShowCommandPalette};
use crate::sequence::{RequestLedger, Settlement};
use crate::state::{FormMode, MapState, VariableCount};
use crate::view::{self, GridSlot, GridView};
use crate::theme::Theme;

pub const TOOLBAR_HEIGHT: f32 = 48.0;
pub const FOOTER_HEIGHT: f32 = 24.0;

// Enough for the widest (4-variable) map plus the expression panel.
pub const MIN_WINDOW_WIDTH: f32 = ROW_HEADER_WIDTH + 4.0 * (CELL_SIZE + GAP_SIZE) + 64.0;
pub const MIN_WINDOW_HEIGHT: f32 = TOOLBAR_HEIGHT
    + COLUMN_HEADER_HEIGHT
    + 4.0 * (CELL_SIZE + GAP_SIZE)
    + 200.0
    + FOOTER_HEIGHT;

// Actions for the map grid
actions!(
    map_grid,
    [MoveUp, MoveDown, MoveLeft, MoveRight, ToggleCell]
);

// Map-wide operations
actions!(
    map_ops,
    [
        ClearAll,
        FillAll,
        UseTwoVariables,
        UseThreeVariables,
        UseFourVariables,
        SopForm,
        PosForm,
        Resimplify,
        Explain,
    ]
);

// Global actions
actions!(kmaps, [Quit]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Explanation panel lifecycle. A fresh simplify result always resets this
/// to `Hidden`; the panel only appears on demand.
#[derive(Clone, Debug, PartialEq)]
enum ExplanationState {
    Hidden,
    Loading,
    Ready(SharedString),
    Failed,
}

/// The main application component
pub struct KmapApp {
    grid: Entity<KmapGrid>,
}

impl KmapApp {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let grid = cx.new(|cx| KmapGrid::new(cx));
        Self { grid }
    }
}

impl Render for KmapApp {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .flex()
            .flex_col()
            .size_full()
            .bg(theme.base)
            .text_color(theme.text)
            .font_family("Berkeley Mono")
            .child(self.grid.clone())
    }
}

/// The K-map editor grid component. Owns the map state exclusively; every
/// mutation is applied synchronously, then a simplify request is issued on
/// the background executor carrying a ticket from the request ledger. Only
/// the response settling as the latest request is ever applied, so a slow
/// response can never overwrite the result of a newer edit.
pub struct KmapGrid {
    focus_handle: FocusHandle,
    state: MapState,
    selected: CellPosition,
    result: Option<SimplificationResult>,
    simplify_requests: RequestLedger,
    explanation: ExplanationState,
    explain_requests: RequestLedger,
    client: SimplifyClient,
    command_palette: Entity<CommandPalette>,
    show_command_palette: bool,
    bootstrapped: bool,
}

impl KmapGrid {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let focus_handle = cx.focus_handle();
        let command_palette = cx.new(|cx| CommandPalette::new(cx));

        Self {
            focus_handle,
            state: MapState::new(VariableCount::Four),
            selected: CellPosition::new(0, 0),
            result: None,
            simplify_requests: RequestLedger::default(),
            explanation: ExplanationState::Hidden,
            explain_requests: RequestLedger::default(),
            client: SimplifyClient::from_env(),
            command_palette,
            show_command_palette: false,
            bootstrapped: false,
        }
    }

    // Selection movement

    fn move_up(&mut self, _: &MoveUp, _window: &mut Window, cx: &mut Context<Self>) {
        self.move_selection(-1, 0, cx);
    }

    fn move_down(&mut self, _: &MoveDown, _window: &mut Window, cx: &mut Context<Self>) {
        self.move_selection(1, 0, cx);
    }

    fn move_left(&mut self, _: &MoveLeft, _window: &mut Window, cx: &mut Context<Self>) {
        self.move_selection(0, -1, cx);
    }

    fn move_right(&mut self, _: &MoveRight, _window: &mut Window, cx: &mut Context<Self>) {
        self.move_selection(0, 1, cx);
    }

    fn move_selection(&mut self, delta_row: isize, delta_col: isize, cx: &mut Context<Self>) {
        let layout = crate::layout::layout(self.state.vars());
        let new_row = (self.selected.row as isize + delta_row)
            .max(0)
            .min((layout.row_count() - 1) as isize) as usize;
        let new_col = (self.selected.col as isize + delta_col)
            .max(0)
            .min((layout.col_count() - 1) as isize) as usize;

        self.selected = CellPosition::new(new_row, new_col);
        cx.notify();
    }

    // Cell mutations. Each one applies synchronously, then re-requests
    // simplification.

    fn toggle_cell(&mut self, _: &ToggleCell, _window: &mut Window, cx: &mut Context<Self>) {
        let view = view::project(&self.state);
        match view.slot(self.selected.row, self.selected.col) {
            Some(GridSlot::Cell { index, .. }) => self.toggle_index(index, cx),
            // Filler positions are inert.
            Some(GridSlot::Filler) | None => {}
        }
    }

    fn toggle_index(&mut self, index: usize, cx: &mut Context<Self>) {
        match self.state.toggle(index) {
            Ok(()) => self.after_mutation(cx),
            Err(err) => warn!("ignoring toggle: {err}"),
        }
    }

    fn clear_all(&mut self, _: &ClearAll, _window: &mut Window, cx: &mut Context<Self>) {
        self.state.clear_all();
        self.after_mutation(cx);
    }

    fn fill_all(&mut self, _: &FillAll, _window: &mut Window, cx: &mut Context<Self>) {
        self.state.fill_all();
        self.after_mutation(cx);
    }

    fn use_two_variables(&mut self, _: &UseTwoVariables, _w: &mut Window, cx: &mut Context<Self>) {
        self.set_variable_count(VariableCount::Two, cx);
    }

    fn use_three_variables(
        &mut self,
        _: &UseThreeVariables,
        _w: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.set_variable_count(VariableCount::Three, cx);
    }

    fn use_four_variables(
        &mut self,
        _: &UseFourVariables,
        _w: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.set_variable_count(VariableCount::Four, cx);
    }

    fn set_variable_count(&mut self, vars: VariableCount, cx: &mut Context<Self>) {
        self.state.resize(vars);
        self.selected = CellPosition::new(0, 0);
        self.after_mutation(cx);
    }

    fn sop_form(&mut self, _: &SopForm, _window: &mut Window, cx: &mut Context<Self>) {
        self.set_mode(FormMode::Sop, cx);
    }

    fn pos_form(&mut self, _: &PosForm, _window: &mut Window, cx: &mut Context<Self>) {
        self.set_mode(FormMode::Pos, cx);
    }

    fn set_mode(&mut self, mode: FormMode, cx: &mut Context<Self>) {
        if self.state.mode() != mode {
            self.state.set_mode(mode);
            self.after_mutation(cx);
        }
    }

    fn resimplify(&mut self, _: &Resimplify, _window: &mut Window, cx: &mut Context<Self>) {
        self.request_simplify(cx);
        cx.notify();
    }

    fn after_mutation(&mut self, cx: &mut Context<Self>) {
        self.request_simplify(cx);
        cx.notify();
    }

    /// Issue a simplify request for the current state. Taking a fresh ticket
    /// first means any response still in flight for an older state settles
    /// as superseded when it lands.
    fn request_simplify(&mut self, cx: &mut Context<Self>) {
        let ticket = self.simplify_requests.begin();
        // An edit invalidates any explanation of the previous result.
        self.explanation = ExplanationState::Hidden;
        self.explain_requests.invalidate();

        let request = SimplifyRequest {
            map: self.state.wire_map(),
            form: self.state.mode(),
        };
        let client = self.client.clone();

        cx.spawn(async move |this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let outcome = cx
                .background_executor()
                .spawn(async move { client.simplify(&request) })
                .await;

            this.update(cx, |grid, cx| {
                let settlement = grid.simplify_requests.settle(ticket, outcome.is_ok());
                if settlement == Settlement::Superseded {
                    // A newer edit superseded this request.
                    return;
                }
                match outcome {
                    Ok(raw) => grid.result = Some(adapter::normalize(raw, grid.state.mode())),
                    Err(err) => {
                        // Keep the previous result on screen; the footer
                        // shows the stale indicator and retry hint.
                        warn!("simplify request failed: {err}");
                    }
                }
                cx.notify();
            })
            .ok();
        })
        .detach();
    }

    fn explain(&mut self, _: &Explain, _window: &mut Window, cx: &mut Context<Self>) {
        self.request_explain(cx);
    }

    fn request_explain(&mut self, cx: &mut Context<Self>) {
        if self.result.is_none() {
            return;
        }
        let ticket = self.explain_requests.begin();
        self.explanation = ExplanationState::Loading;

        let client = self.client.clone();
        cx.spawn(async move |this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let outcome = cx
                .background_executor()
                .spawn(async move { client.explain() })
                .await;

            this.update(cx, |grid, cx| {
                if grid.explain_requests.settle(ticket, outcome.is_ok()) == Settlement::Superseded {
                    return;
                }
                grid.explanation = match outcome {
                    Ok(text) => ExplanationState::Ready(text.into()),
                    Err(err) => {
                        warn!("explain request failed: {err}");
                        ExplanationState::Failed
                    }
                };
                cx.notify();
            })
            .ok();
        })
        .detach();
        cx.notify();
    }

    fn on_cell_click(&mut self, position: CellPosition, index: usize, cx: &mut Context<Self>) {
        self.selected = position;
        self.toggle_index(index, cx);
    }

    // Command palette

    fn show_command_palette(
        &mut self,
        _: &ShowCommandPalette,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.show_command_palette = true;
        self.command_palette.update(cx, |palette, cx| {
            palette.reset(cx);
        });

        let palette_focus = self.command_palette.focus_handle(cx);
        palette_focus.focus(window);
        cx.notify();
    }

    fn hide_command_palette(
        &mut self,
        _: &HideCommandPalette,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.show_command_palette = false;
        self.focus_handle.focus(window);
        cx.notify();
    }

    fn handle_command(&mut self, cmd_id: &str, window: &mut Window, cx: &mut Context<Self>) {
        // Hide palette first
        self.show_command_palette = false;
        self.focus_handle.focus(window);

        match cmd_id {
            "clear_all" => self.clear_all(&ClearAll, window, cx),
            "fill_all" => self.fill_all(&FillAll, window, cx),
            "vars_2" => self.use_two_variables(&UseTwoVariables, window, cx),
            "vars_3" => self.use_three_variables(&UseThreeVariables, window, cx),
            "vars_4" => self.use_four_variables(&UseFourVariables, window, cx),
            "mode_sop" => self.sop_form(&SopForm, window, cx),
            "mode_pos" => self.pos_form(&PosForm, window, cx),
            "resimplify" => self.resimplify(&Resimplify, window, cx),
            "explain" => self.request_explain(cx),
            "quit" => cx.quit(),
            _ => {}
        }
        cx.notify();
    }

    // Rendering

    fn render_toolbar(&self, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let mode = self.state.mode();

        div()
            .flex()
            .flex_row()
            .w_full()
            .h(px(TOOLBAR_HEIGHT))
            .bg(theme.mantle)
            .border_b_1()
            .border_color(theme.surface0)
            .items_center()
            .px(px(8.))
            .gap(px(8.))
            .child(self.render_var_chip(VariableCount::Two, "2 vars", cx))
            .child(self.render_var_chip(VariableCount::Three, "3 vars", cx))
            .child(self.render_var_chip(VariableCount::Four, "4 vars", cx))
            .child(div().w(px(16.)))
            .child(self.render_op_chip("clear_all", "Clear All (0)", false, cx))
            .child(self.render_op_chip("fill_all", "Fill All (1)", false, cx))
            .child(div().flex_1())
            .child(self.render_op_chip("mode_sop", "SOP", mode == FormMode::Sop, cx))
            .child(self.render_op_chip("mode_pos", "POS", mode == FormMode::Pos, cx))
    }

    fn chip(&self, active: bool, cx: &Context<Self>) -> Div {
        let theme = cx.global::<Theme>();
        div()
            .flex()
            .items_center()
            .justify_center()
            .h(px(28.))
            .px(px(10.))
            .rounded(px(4.))
            .text_size(px(13.))
            .bg(if active { theme.accent } else { theme.surface0 })
            .text_color(if active { theme.mantle } else { theme.subtext1 })
            .cursor_pointer()
    }

    fn render_var_chip(
        &self,
        vars: VariableCount,
        label: &'static str,
        cx: &Context<Self>,
    ) -> Stateful<Div> {
        self.chip(self.state.vars() == vars, cx)
            .id(ElementId::Name(format!("vars-{}", vars.as_u8()).into()))
            .on_mouse_down(MouseButton::Left, {
                let entity = cx.entity().clone();
                move |_, _window, app| {
                    entity.update(app, |grid, cx| {
                        grid.set_variable_count(vars, cx);
                    });
                }
            })
            .child(label)
    }

    fn render_op_chip(
        &self,
        id: &'static str,
        label: &'static str,
        active: bool,
        cx: &Context<Self>,
    ) -> Stateful<Div> {
        self.chip(active, cx)
            .id(ElementId::Name(id.into()))
            .on_mouse_down(MouseButton::Left, {
                let entity = cx.entity().clone();
                move |_, window, app| {
                    entity.update(app, |grid, cx| {
                        grid.handle_command(id, window, cx);
                    });
                }
            })
            .child(label)
    }

    fn render_grid(&self, view: &GridView, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .flex()
            .flex_col()
            .gap(px(GAP_SIZE))
            .p(px(GRID_PADDING))
            .child(self.render_column_headers(view, cx))
            .children(view.rows.iter().enumerate().map(|(row_idx, row)| {
                div()
                    .flex()
                    .flex_row()
                    .gap(px(GAP_SIZE))
                    .child(
                        // Row label
                        div()
                            .w(px(ROW_HEADER_WIDTH))
                            .h(px(CELL_SIZE))
                            .flex_none()
                            .flex()
                            .items_center()
                            .justify_center()
                            .bg(theme.mantle)
                            .rounded(px(4.))
                            .text_size(px(12.))
                            .text_color(theme.subtext0)
                            .child(row.label),
                    )
                    .children(
                        row.slots
                            .iter()
                            .enumerate()
                            .map(|(col_idx, slot)| self.render_slot(row_idx, col_idx, *slot, cx)),
                    )
            }))
            // Grouping overlay layer: anchored past the label column/row plus
            // one gap, in the same pixel units as the cell layout above.
            .child(
                div()
                    .absolute()
                    .top(px(GRID_PADDING + COLUMN_HEADER_HEIGHT + GAP_SIZE))
                    .left(px(GRID_PADDING + ROW_HEADER_WIDTH + GAP_SIZE))
                    .children(self.render_group_overlays(cx)),
            )
    }

    fn render_column_headers(&self, view: &GridView, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .flex()
            .flex_row()
            .gap(px(GAP_SIZE))
            .child(
                // Corner cell naming both variable groups.
                div()
                    .w(px(ROW_HEADER_WIDTH))
                    .h(px(COLUMN_HEADER_HEIGHT))
                    .flex_none()
                    .flex()
                    .items_center()
                    .justify_between()
                    .px(px(6.))
                    .bg(theme.mantle)
                    .rounded(px(4.))
                    .text_size(px(11.))
                    .text_color(theme.subtext0)
                    .child(view.row_axis)
                    .child(div().text_color(theme.subtext1).child(view.col_axis)),
            )
            .children(view.col_labels.iter().map(|label| {
                div()
                    .w(px(CELL_SIZE))
                    .h(px(COLUMN_HEADER_HEIGHT))
                    .flex_none()
                    .flex()
                    .items_center()
                    .justify_center()
                    .bg(theme.mantle)
                    .rounded(px(4.))
                    .text_size(px(12.))
                    .text_color(theme.subtext0)
                    .child(*label)
            }))
    }

    fn render_slot(
        &self,
        row: usize,
        col: usize,
        slot: GridSlot,
        cx: &Context<Self>,
    ) -> Stateful<Div> {
        let theme = cx.global::<Theme>();
        let is_selected = self.selected.row == row && self.selected.col == col;

        match slot {
            GridSlot::Cell { index, value } => {
                let (bg, value_color) = match value {
                    crate::state::CellValue::Zero => (theme.cell_zero, theme.text),
                    crate::state::CellValue::One => (theme.cell_one, theme.cell_one_text),
                    crate::state::CellValue::DontCare => {
                        (theme.cell_dont_care, theme.cell_dont_care_text)
                    }
                };

                div()
                    .id(ElementId::Name(format!("cell-{index}").into()))
                    .w(px(CELL_SIZE))
                    .h(px(CELL_SIZE))
                    .flex_none()
                    .flex()
                    .flex_col()
                    .items_center()
                    .justify_center()
                    .bg(bg)
                    .rounded(px(4.))
                    .border_1()
                    .border_color(if is_selected {
                        theme.accent
                    } else {
                        theme.surface0
                    })
                    .when(is_selected, |d| d.border_2())
                    .cursor_pointer()
                    .on_mouse_down(MouseButton::Left, {
                        let entity = cx.entity().clone();
                        move |_, _window, app| {
                            entity.update(app, |grid, cx| {
                                grid.on_cell_click(CellPosition::new(row, col), index, cx);
                            });
                        }
                    })
                    .child(
                        div()
                            .text_size(px(24.))
                            .font_weight(FontWeight::EXTRA_BOLD)
                            .text_color(value_color)
                            .child(value.glyph()),
                    )
                    .child(
                        div()
                            .text_size(px(10.))
                            .text_color(theme.subtext0)
                            .child(format!("m{index}")),
                    )
            }
            // Inert filler for positions the current variable count does not
            // use; it takes no clicks and shows no value.
            GridSlot::Filler => div()
                .id(ElementId::Name(format!("filler-{row}-{col}").into()))
                .w(px(CELL_SIZE))
                .h(px(CELL_SIZE))
                .flex_none()
                .bg(theme.filler)
                .rounded(px(4.)),
        }
    }

    fn render_group_overlays(&self, cx: &Context<Self>) -> Vec<Div> {
        let theme = cx.global::<Theme>();
        let Some(result) = &self.result else {
            return Vec::new();
        };

        // Overlapping groups stack in input order; there is no collision
        // resolution between them.
        result
            .groups
            .iter()
            .map(|group| {
                let rect = geometry::overlay_rect(group, CELL_SIZE, GAP_SIZE);
                let color = theme.group_border(&group.color);
                div()
                    .absolute()
                    .top(px(rect.top))
                    .left(px(rect.left))
                    .w(px(rect.width))
                    .h(px(rect.height))
                    .rounded(px(8.))
                    .border_2()
                    .border_color(color)
            })
            .collect()
    }

    fn render_expression_panel(&self, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        let (simplified, original, label, terms) = match &self.result {
            Some(result) => {
                let terms = match result.form {
                    FormMode::Sop => &result.minterms,
                    FormMode::Pos => &result.maxterms,
                };
                let terms = if terms.is_empty() {
                    MISSING_EXPRESSION.to_string()
                } else {
                    terms
                        .iter()
                        .map(|t| t.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                (
                    result.simplified_expression.clone(),
                    result.original_expression.clone(),
                    terms_label(result.form),
                    terms,
                )
            }
            // Before the first result, label by the currently selected mode.
            None => (
                MISSING_EXPRESSION.to_string(),
                MISSING_EXPRESSION.to_string(),
                terms_label(self.state.mode()),
                MISSING_EXPRESSION.to_string(),
            ),
        };

        div()
            .flex()
            .flex_col()
            .mx(px(16.))
            .mb(px(8.))
            .p(px(12.))
            .gap(px(6.))
            .bg(theme.mantle)
            .rounded(px(8.))
            .border_1()
            .border_color(theme.surface0)
            .child(
                div()
                    .text_size(px(12.))
                    .text_color(theme.subtext0)
                    .child("Simplified Expression"),
            )
            .child(
                div()
                    .text_size(px(22.))
                    .font_weight(FontWeight::BOLD)
                    .text_color(theme.cell_one_text)
                    .child(simplified),
            )
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap(px(6.))
                    .text_size(px(12.))
                    .child(div().text_color(theme.subtext0).child("Original:"))
                    .child(div().text_color(theme.subtext1).child(original)),
            )
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap(px(6.))
                    .text_size(px(12.))
                    .child(div().text_color(theme.subtext0).child(label))
                    .child(div().text_color(theme.subtext1).child(format!("({terms})"))),
            )
            .child(
                div()
                    .id("get-explanation")
                    .mt(px(4.))
                    .flex()
                    .items_center()
                    .justify_center()
                    .w(px(160.))
                    .h(px(28.))
                    .rounded(px(4.))
                    .bg(theme.surface0)
                    .text_size(px(13.))
                    .text_color(theme.text)
                    .cursor_pointer()
                    .on_mouse_down(MouseButton::Left, {
                        let entity = cx.entity().clone();
                        move |_, _window, app| {
                            entity.update(app, |grid, cx| {
                                grid.request_explain(cx);
                            });
                        }
                    })
                    .child("Get AI Explanation"),
            )
    }

    fn render_explanation(&self, cx: &Context<Self>) -> Option<impl IntoElement> {
        let theme = cx.global::<Theme>();

        let body: SharedString = match &self.explanation {
            ExplanationState::Hidden => return None,
            ExplanationState::Loading => "Thinking…".into(),
            ExplanationState::Ready(text) => text.clone(),
            ExplanationState::Failed => "Failed to fetch explanation. Try again later.".into(),
        };
        let failed = self.explanation == ExplanationState::Failed;

        Some(
            div()
                .flex()
                .flex_col()
                .mx(px(16.))
                .mb(px(8.))
                .p(px(12.))
                .gap(px(6.))
                .max_h(px(220.))
                .overflow_hidden()
                .bg(theme.mantle)
                .rounded(px(8.))
                .border_1()
                .border_color(theme.surface0)
                .child(
                    div()
                        .text_size(px(12.))
                        .text_color(theme.subtext0)
                        .child("Explanation"),
                )
                .child(
                    div()
                        .text_size(px(13.))
                        .text_color(if failed { theme.warning } else { theme.subtext1 })
                        .child(body),
                ),
        )
    }

    fn render_footer(&self, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        let status = if self.simplify_requests.is_pending() {
            "simplifying…"
        } else if self.simplify_requests.is_stale() {
            "stale (press r to retry)"
        } else {
            "synced"
        };

        div()
            .flex()
            .flex_row()
            .w_full()
            .h(px(FOOTER_HEIGHT))
            .bg(theme.mantle)
            .border_t_1()
            .border_color(theme.surface0)
            .items_center()
            .justify_between()
            .px(px(8.))
            .text_size(px(12.))
            .text_color(theme.subtext0)
            .child(
                div()
                    .font_weight(FontWeight::BOLD)
                    .child(format!(
                        "-- {} / {} VARS --",
                        self.state.mode().label(),
                        self.state.vars().as_u8()
                    )),
            )
            .child(
                div()
                    .when(self.simplify_requests.is_stale(), |d| {
                        d.text_color(theme.warning)
                    })
                    .child(status),
            )
    }
}

impl Render for KmapGrid {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // First simplify request for the initial all-zero map.
        if !self.bootstrapped {
            self.bootstrapped = true;
            self.request_simplify(cx);
        }

        let view = view::project(&self.state);

        let key_context = if self.show_command_palette {
            "CommandPalette"
        } else {
            "MapGrid"
        };

        // Set up command handler for the palette
        let entity = cx.entity().clone();
        self.command_palette.update(cx, |palette, _cx| {
            palette.set_command_handler(move |cmd_id, window, app| {
                entity.update(app, |grid, cx| {
                    grid.handle_command(cmd_id, window, cx);
                });
            });
        });

        let show_palette = self.show_command_palette;

        div()
            .flex()
            .flex_col()
            .size_full()
            .key_context(key_context)
            .track_focus(&self.focus_handle)
            // Selection and editing
            .on_action(cx.listener(Self::move_up))
            .on_action(cx.listener(Self::move_down))
            .on_action(cx.listener(Self::move_left))
            .on_action(cx.listener(Self::move_right))
            .on_action(cx.listener(Self::toggle_cell))
            // Map operations
            .on_action(cx.listener(Self::clear_all))
            .on_action(cx.listener(Self::fill_all))
            .on_action(cx.listener(Self::use_two_variables))
            .on_action(cx.listener(Self::use_three_variables))
            .on_action(cx.listener(Self::use_four_variables))
            .on_action(cx.listener(Self::sop_form))
            .on_action(cx.listener(Self::pos_form))
            .on_action(cx.listener(Self::resimplify))
            .on_action(cx.listener(Self::explain))
            // Command palette actions
            .on_action(cx.listener(Self::show_command_palette))
            .on_action(cx.listener(Self::hide_command_palette))
            .child(self.render_toolbar(cx))
            .child(self.render_grid(&view, cx))
            .child(self.render_expression_panel(cx))
            .children(self.render_explanation(cx))
            .child(div().flex_1())
            .child(self.render_footer(cx))
            // Command palette overlay
            .when(show_palette, |d| {
                d.child(
                    div()
                        .absolute()
                        .size_full()
                        .top_0()
                        .left_0()
                        .flex()
                        .items_start()
                        .justify_center()
                        .pt(px(100.))
                        .bg(rgba(0x00000080))
                        .on_mouse_down(MouseButton::Left, {
                            let entity = cx.entity().clone();
                            move |_, window, app| {
                                entity.update(app, |grid, cx| {
                                    grid.hide_command_palette(&HideCommandPalette, window, cx);
                                });
                            }
                        })
                        .child(
                            div()
                                .on_mouse_down(MouseButton::Left, |_, _, _| {
                                    // Prevent click from bubbling to backdrop
                                })
                                .child(self.command_palette.clone()),
                        ),
                )
            })
    }
}

impl Focusable for KmapGrid {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

/// Term-list caption for a form mode. Used both for a result's form and, when
/// no result exists yet, for the mode currently selected in the editor.
fn terms_label(form: FormMode) -> &'static str {
    match form {
        FormMode::Sop => "Minterms (1s):",
        FormMode::Pos => "Maxterms (0s):",
    }
}

#[cfg(test)]
mod tests {
    use super::{terms_label, FormMode};
    use pretty_assertions::assert_eq;

    #[test]
    fn terms_label_follows_form_mode() {
        assert_eq!(terms_label(FormMode::Sop), "Minterms (1s):");
        // POS mode must be labelled correctly even before any result arrives.
        assert_eq!(terms_label(FormMode::Pos), "Maxterms (0s):");
    }
}
