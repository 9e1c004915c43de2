use crate::shared::icons::icon;
use contracts::domain::a001_tables::format::format_cell;
use contracts::domain::a001_tables::DataRow;
use leptos::prelude::*;
use thaw::*;

/// Rows under their headers, one edit action per row.
#[component]
pub fn DataTable(
    headers: Vec<String>,
    rows: Vec<DataRow>,
    on_edit: Callback<DataRow>,
) -> impl IntoView {
    let header_cells = headers
        .iter()
        .map(|h| {
            let h = h.clone();
            view! {
                <TableHeaderCell resizable=true min_width=120.0>
                    {h.clone()}
                </TableHeaderCell>
            }
        })
        .collect_view();

    let body_rows = rows
        .into_iter()
        .map(|row| {
            let cells = headers
                .iter()
                .map(|h| {
                    let text = format_cell(row.get(h));
                    view! {
                        <TableCell>
                            <TableCellLayout truncate=true>{text}</TableCellLayout>
                        </TableCell>
                    }
                })
                .collect_view();

            view! {
                <TableRow>
                    {cells}
                    <TableCell>
                        <button
                            class="button button--icon"
                            title="Modifier"
                            on:click=move |_| on_edit.run(row.clone())
                        >
                            {icon("edit")}
                        </button>
                    </TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <div class="data-table">
            <Table>
                <TableHeader>
                    <TableRow>
                        {header_cells}
                        <TableHeaderCell min_width=80.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>{body_rows}</TableBody>
            </Table>
        </div>
    }
}
