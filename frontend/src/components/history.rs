//! Read-only table of past exports.

use leptos::*;

use crate::config::BACKEND_URL;
use crate::state::{history_rows, RowAction, EMPTY_HISTORY};
use crate::types::ExportRecord;

#[component]
pub fn HistoryTable(records: Vec<ExportRecord>) -> impl IntoView {
    let rows = history_rows(&records, BACKEND_URL);

    if rows.is_empty() {
        return view! { <p class="empty-state">{EMPTY_HISTORY}</p> }.into_view();
    }

    view! {
        <table class="table history-table">
            <thead>
                <tr>
                    <th>"Date"</th>
                    <th>"Type"</th>
                    <th>"File"</th>
                    <th>"Items"</th>
                    <th>"Action"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        let action = match row.action {
                            RowAction::Download(url) => view! {
                                <a class="btn btn-sm btn-success" href=url>"Download"</a>
                            }
                            .into_view(),
                            RowAction::Open(url) => view! {
                                <a class="btn btn-sm btn-primary" href=url target="_blank">"Open"</a>
                            }
                            .into_view(),
                            RowAction::Unavailable => view! {
                                <button class="btn btn-sm btn-secondary" disabled=true>"Unavailable"</button>
                            }
                            .into_view(),
                        };
                        view! {
                            <tr>
                                <td>{row.created}</td>
                                <td><span class=row.badge_class>{row.badge}</span></td>
                                <td>{row.filename}</td>
                                <td>{row.item_count}</td>
                                <td>{action}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}
