//! Editable results table.

use leptos::*;

use super::alert::{show_alert, use_alerts};
use crate::config::SAVE_ERROR_FALLBACK;
use crate::services::update_data;
use crate::state::{current_year, EditorRow, RowEdit, RowEditor, Severity};
use crate::types::Period;

/// Milliseconds since the epoch, for row ids.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[component]
pub fn RowEditorTable(editor: RwSignal<RowEditor>) -> impl IntoView {
    let alerts = use_alerts();
    let (saving, set_saving) = create_signal(false);
    let bulk_text = create_rw_signal(String::new());

    let on_add = move |_| {
        editor.update(|e| {
            e.add_row(now_ms(), Period::current());
        });
    };

    let on_bulk_add = move |_| {
        let text = bulk_text.get_untracked();
        let mut added = 0;
        editor.update(|e| added = e.bulk_add(&text, now_ms(), Period::current()));
        if added > 0 {
            bulk_text.set(String::new());
            show_alert(alerts, Severity::Info, format!("Added {} items.", added));
        }
    };

    let on_save = move |_| {
        let payload = editor.with_untracked(|e| e.payload(current_year()));
        set_saving.set(true);
        spawn_local(async move {
            match update_data(&payload, SAVE_ERROR_FALLBACK).await {
                Ok(_) => show_alert(alerts, Severity::Success, "Changes saved successfully."),
                Err(e) => show_alert(alerts, Severity::Danger, e.user_message(SAVE_ERROR_FALLBACK)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="editor">
            <div class="editor-toolbar">
                <button class="btn btn-secondary" on:click=on_add>"Add Empty Row"</button>
                <button
                    class="btn btn-primary"
                    prop:disabled=move || saving.get()
                    on:click=on_save
                >
                    {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                </button>
            </div>

            <table class="table">
                <thead>
                    <tr>
                        <th>"Item #"</th>
                        <th>"Dept"</th>
                        <th>"Price"</th>
                        <th>"Qty"</th>
                        <th>"Exception"</th>
                        <th>"Period"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || editor.with(|e| e.rows().to_vec())
                        key=|row| row.id
                        children=move |row| view! { <EditorRowView row=row editor=editor/> }
                    />
                </tbody>
            </table>
            <Show when=move || editor.with(|e| e.is_empty())>
                <p class="empty-state">"No items. Add a row or paste item numbers below."</p>
            </Show>

            <div class="bulk-add">
                <label for="bulkItems">"Bulk add item numbers (one per line)"</label>
                <textarea
                    id="bulkItems"
                    rows="4"
                    prop:value=move || bulk_text.get()
                    on:input=move |ev| bulk_text.set(event_target_value(&ev))
                ></textarea>
                <button class="btn btn-secondary" on:click=on_bulk_add>"Add Items"</button>
            </div>
        </div>
    }
}

#[component]
fn EditorRowView(row: EditorRow, editor: RwSignal<RowEditor>) -> impl IntoView {
    let id = row.id;
    let edit = move |change: RowEdit| {
        editor.update(|e| {
            e.edit(id, change);
        });
    };
    // Reflects the clamped value back into the input
    let quantity = move || {
        editor.with(|e| {
            e.rows()
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.quantity.to_string())
                .unwrap_or_default()
        })
    };

    view! {
        <tr>
            <td>
                <input
                    type="text"
                    class="form-control"
                    value=row.item_number.clone()
                    on:input=move |ev| edit(RowEdit::ItemNumber(event_target_value(&ev)))
                />
            </td>
            <td class="department">{row.department.clone()}</td>
            <td>
                <input
                    type="text"
                    class="form-control"
                    value=row.price.clone()
                    on:input=move |ev| edit(RowEdit::Price(event_target_value(&ev)))
                />
            </td>
            <td>
                <input
                    type="number"
                    min="1"
                    class="form-control"
                    prop:value=quantity
                    on:change=move |ev| edit(RowEdit::Quantity(event_target_value(&ev)))
                />
            </td>
            <td>
                <input
                    type="text"
                    class="form-control"
                    value=row.exception.clone()
                    on:input=move |ev| edit(RowEdit::Exception(event_target_value(&ev)))
                />
            </td>
            <td>
                <select
                    class="form-select"
                    on:change=move |ev| edit(RowEdit::Period(event_target_value(&ev)))
                >
                    {Period::all()
                        .map(|p| view! { <option value=p.code() selected={p == row.period}>{p.code()}</option> })
                        .collect_view()}
                </select>
            </td>
            <td>
                <button
                    class="btn btn-danger btn-sm"
                    on:click=move |_| editor.update(|e| {
                        e.delete(id);
                    })
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
