//! Navigation chrome: breadcrumbs and sortable column headers.

use leptos::*;

use crate::model::{SortColumn, SortOrder, SortPreference};

#[component]
/// Breadcrumb trail for the listed path: a root link, one link per
/// ancestor segment, and the current segment unlinked.
pub fn Breadcrumbs(
    /// Store path being listed.
    #[prop(into)]
    path: Signal<String>,
) -> impl IntoView {
    let crumbs = move || {
        let path = path.get();
        let segments: Vec<String> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        let mut cumulative = String::new();
        let last = segments.len().saturating_sub(1);
        segments
            .into_iter()
            .enumerate()
            .map(|(i, segment)| {
                cumulative.push('/');
                cumulative.push_str(&segment);
                (segment, cumulative.clone(), i == last)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <nav class="breadcrumb">
            <span class="breadcrumb-item">
                <a class="breadcrumb-link" href="/">"🏠 Root"</a>
            </span>
            <For
                each=crumbs
                key=|(_, href, is_last)| (href.clone(), *is_last)
                let:crumb
            >
                {
                    let (segment, href, is_last) = crumb;
                    if is_last {
                        view! {
                            <span class="breadcrumb-item breadcrumb-current">{segment}</span>
                        }
                        .into_view()
                    } else {
                        view! {
                            <span class="breadcrumb-item">
                                <a class="breadcrumb-link" href=href>{segment}</a>
                            </span>
                        }
                        .into_view()
                    }
                }
            </For>
        </nav>
    }
}

#[component]
/// One sortable column header with its direction indicator.
pub fn ColumnHeader(
    /// Visible column label.
    label: &'static str,
    /// Column this header sorts by.
    column: SortColumn,
    /// Sort the listing is currently ordered by.
    sort: SortPreference,
    /// Invoked with the chosen preference on click.
    #[prop(into)]
    on_choose: Callback<SortPreference>,
) -> impl IntoView {
    let active = sort.column == column;
    let indicator = if active {
        match sort.order {
            SortOrder::Asc => " ↑",
            SortOrder::Desc => " ↓",
        }
    } else {
        ""
    };

    let on_click = move |_| {
        // Clicking the active column flips it; any other column starts
        // ascending.
        let order = if active {
            sort.order.flipped()
        } else {
            SortOrder::Asc
        };
        on_choose.call(SortPreference { column, order });
    };

    view! {
        <th class="sortable" class:active-sort=active on:click=on_click>
            {label}
            <span class="sort-indicator">{indicator}</span>
        </th>
    }
}
