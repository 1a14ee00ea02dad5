//! UI Components for the employee screens.

use std::rc::Rc;

use chrono::NaiveDate;
use hrnet::{
    CONFIRMATION_MESSAGE, COLUMNS, Column, Employee, EmployeeForm, FIELDS, Field, FieldKind,
    FormPhase, PAGE_SIZES, Route, SortDirection, TableQuery, parse_iso_date,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::storage::RosterHandle;

/// Confirmation dialog.
#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return html! {};
    }

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-overlay" onclick={on_close_click.clone()}>
            <div
                class="modal-dialog"
                role="dialog"
                aria-modal="true"
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
            >
                <h3 class="modal-title">{ props.title.clone() }</h3>
                <div class="modal-content">
                    { props.children.clone() }
                </div>
                <div class="modal-buttons">
                    <button class="modal-button" aria-label="Close" onclick={on_close_click}>
                        { "Close" }
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Date picker: a nullable date in, a nullable date out.
#[derive(Properties, PartialEq)]
pub struct DateInputProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: Option<NaiveDate>,
    pub on_change: Callback<Option<NaiveDate>>,
    #[prop_or_default]
    pub required: bool,
}

#[function_component(DateInput)]
pub fn date_input(props: &DateInputProps) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(parse_iso_date(&target.value()));
        })
    };

    let value = props
        .value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    html! {
        <input
            type="date"
            class="field-input"
            id={props.id.clone()}
            name={props.id.clone()}
            value={value}
            oninput={on_input}
            required={props.required}
            aria-required={props.required.to_string()}
            aria-label={props.label.clone()}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct EmployeeFormPageProps {
    pub roster: RosterHandle,
    pub dates_required: bool,
    pub on_navigate: Callback<Route>,
}

/// Create-employee screen.
#[function_component(EmployeeFormPage)]
pub fn employee_form_page(props: &EmployeeFormPageProps) -> Html {
    let dates_required = props.dates_required;
    let form = use_state(move || EmployeeForm::new(dates_required));

    let on_edit = {
        let form = form.clone();
        Callback::from(move |(field, value): (Field, String)| {
            let mut new_form = (*form).clone();
            new_form.edit(field, value);
            form.set(new_form);
        })
    };

    let on_edit_date = {
        let form = form.clone();
        Callback::from(move |(field, date): (Field, Option<NaiveDate>)| {
            let mut new_form = (*form).clone();
            new_form.edit_date(field, date);
            form.set(new_form);
        })
    };

    let on_submit = {
        let form = form.clone();
        let roster = props.roster.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut new_form = (*form).clone();
            let result = {
                let mut roster = roster.borrow_mut();
                new_form.submit(&mut **roster)
            };
            match result {
                Ok(employee) => gloo::console::log!(format!(
                    "Saved employee {} {}",
                    employee.first_name, employee.last_name
                )),
                Err(err) => gloo::console::error!(format!("Employee not saved: {err}")),
            }
            form.set(new_form);
        })
    };

    let on_dismiss = {
        let form = form.clone();
        Callback::from(move |_: ()| {
            let mut new_form = (*form).clone();
            new_form.dismiss_confirmation();
            form.set(new_form);
        })
    };

    let on_go_to_list = {
        let form = form.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| {
            let mut new_form = (*form).clone();
            let route = new_form.go_to_list();
            form.set(new_form);
            on_navigate.emit(route);
        })
    };

    let on_view_list = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Route::List))
    };

    let draft = form.draft();
    let confirmed = form.phase() == FormPhase::ConfirmationShown;

    let controls = FIELDS.iter().map(|descriptor| {
        let field = descriptor.field;
        let id = field.key();
        let required = !field.is_date() || dates_required;

        let control = match descriptor.kind {
            FieldKind::Text => {
                let on_edit = on_edit.clone();
                let oninput = Callback::from(move |e: InputEvent| {
                    let target: HtmlInputElement = e.target_unchecked_into();
                    on_edit.emit((field, target.value()));
                });
                html! {
                    <input
                        class="field-input"
                        id={id}
                        name={id}
                        value={draft.value(field)}
                        placeholder={descriptor.label}
                        oninput={oninput}
                        required={true}
                        aria-required="true"
                    />
                }
            }
            FieldKind::Date => {
                let on_edit_date = on_edit_date.clone();
                let on_change =
                    Callback::from(move |date: Option<NaiveDate>| on_edit_date.emit((field, date)));
                html! {
                    <DateInput
                        id={id}
                        label={descriptor.label}
                        value={draft.date(field)}
                        on_change={on_change}
                        required={required}
                    />
                }
            }
            FieldKind::Select(choices) => {
                let on_edit = on_edit.clone();
                let onchange = Callback::from(move |e: Event| {
                    let target: HtmlSelectElement = e.target_unchecked_into();
                    on_edit.emit((field, target.value()));
                });
                let current = draft.value(field);
                html! {
                    <select
                        class="field-input"
                        id={id}
                        name={id}
                        onchange={onchange}
                        required={true}
                        aria-required="true"
                    >
                        <option value="" selected={current.is_empty()}>
                            { choices.placeholder() }
                        </option>
                        { for choices.options().into_iter().map(|(value, label)| html! {
                            <option key={value} value={value} selected={current == value}>
                                { label }
                            </option>
                        })}
                    </select>
                }
            }
        };

        html! {
            <div class="field" key={id}>
                <label for={id} class="field-label">{ descriptor.label }</label>
                { control }
            </div>
        }
    });

    html! {
        <div class="panel form-panel" role="region" aria-labelledby="employee-form-title">
            <div class="panel-header">
                <h2 id="employee-form-title">{ "Create Employee" }</h2>
            </div>

            <Modal open={confirmed} title="Confirmation" on_close={on_dismiss}>
                <p>{ CONFIRMATION_MESSAGE }</p>
            </Modal>

            <form class="panel-content employee-form" onsubmit={on_submit} aria-label="Employee registration form">
                { for controls }
                <div class="button-group">
                    <button type="submit" class="save-button" aria-label="Submit employee form">
                        { "Save" }
                    </button>
                    <button type="button" class="list-button" onclick={on_view_list} aria-label="View employee list">
                        { "View Employee List" }
                    </button>
                </div>
            </form>

            if confirmed {
                <div class="status" role="status" aria-live="polite">
                    <p>{ CONFIRMATION_MESSAGE }</p>
                    <button class="list-button" onclick={on_go_to_list} aria-label="Go to employee list">
                        { "Go to Employee List" }
                    </button>
                </div>
            }
        </div>
    }
}

/// Sortable, searchable, paginated grid over a fixed collection.
#[derive(Properties)]
pub struct EmployeeTableProps {
    pub employees: Rc<Vec<Employee>>,
    #[prop_or(COLUMNS)]
    pub columns: &'static [Column],
    pub page_size: usize,
}

impl PartialEq for EmployeeTableProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.employees, &other.employees)
            && std::ptr::eq(self.columns, other.columns)
            && self.page_size == other.page_size
    }
}

#[function_component(EmployeeTable)]
pub fn employee_table(props: &EmployeeTableProps) -> Html {
    let page_size = props.page_size;
    let query = use_state(move || TableQuery::new(page_size));

    let on_search = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            let mut new_query = (*query).clone();
            new_query.set_search(target.value());
            query.set(new_query);
        })
    };

    let on_page_size = {
        let query = query.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(size) = target.value().parse::<usize>() {
                let mut new_query = (*query).clone();
                new_query.set_page_size(size);
                query.set(new_query);
            }
        })
    };

    let on_sort = {
        let query = query.clone();
        Callback::from(move |column: usize| {
            let mut new_query = (*query).clone();
            new_query.toggle_sort(column);
            query.set(new_query);
        })
    };

    let page = query.project_columns(props.columns, &props.employees);

    let go_to_page = |target: usize| {
        let query = query.clone();
        Callback::from(move |_: MouseEvent| {
            let mut new_query = (*query).clone();
            new_query.set_page(target);
            query.set(new_query);
        })
    };
    let on_previous = go_to_page(page.page.saturating_sub(1));
    let on_next = go_to_page(page.page + 1);

    let headers = props.columns.iter().enumerate().map(|(idx, column)| {
        let (class, aria_sort) = match query.sort() {
            Some((col, SortDirection::Ascending)) if col == idx => ("sorting-asc", "ascending"),
            Some((col, SortDirection::Descending)) if col == idx => ("sorting-desc", "descending"),
            _ => ("sorting", "none"),
        };
        let on_sort = on_sort.clone();
        html! {
            <th class={class} aria-sort={aria_sort} onclick={Callback::from(move |_: MouseEvent| on_sort.emit(idx))}>
                { column.title }
            </th>
        }
    });

    html! {
        <div class="table-wrapper">
            <div class="table-controls">
                <label class="page-size">
                    { "Show " }
                    <select onchange={on_page_size}>
                        { for PAGE_SIZES.iter().map(|size| html! {
                            <option value={size.to_string()} selected={*size == query.page_size()}>
                                { size.to_string() }
                            </option>
                        })}
                    </select>
                    { " entries" }
                </label>
                <label class="search">
                    { "Search: " }
                    <input type="search" value={query.search().to_string()} oninput={on_search} />
                </label>
            </div>
            <table id="employee-table" class="display">
                <thead>
                    <tr>{ for headers }</tr>
                </thead>
                <tbody>
                    if page.rows.is_empty() {
                        <tr>
                            <td class="empty" colspan={props.columns.len().to_string()}>
                                { "No matching records found" }
                            </td>
                        </tr>
                    } else {
                        { for page.rows.iter().enumerate().map(|(n, row)| html! {
                            <tr key={row.id.map(|id| id.to_string()).unwrap_or_else(|| format!("row-{n}"))}>
                                { for row.cells.iter().map(|cell| html! { <td>{ cell }</td> }) }
                            </tr>
                        })}
                    }
                </tbody>
            </table>
            <div class="table-footer">
                <span class="stats">{ page.summary() }</span>
                <div class="button-group">
                    <button disabled={!page.has_previous()} onclick={on_previous}>{ "Previous" }</button>
                    <span class="page-number">{ format!("{} / {}", page.page + 1, page.page_count) }</span>
                    <button disabled={!page.has_next()} onclick={on_next}>{ "Next" }</button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmployeeListPageProps {
    pub roster: RosterHandle,
    pub page_size: usize,
    pub on_navigate: Callback<Route>,
}

/// Employee list screen. Reads the roster once, when first shown.
#[function_component(EmployeeListPage)]
pub fn employee_list_page(props: &EmployeeListPageProps) -> Html {
    let roster = props.roster.clone();
    let employees = use_state(move || Rc::new(roster.load()));

    let on_back = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_navigate.emit(Route::Form);
        })
    };

    html! {
        <div class="panel list-panel">
            <div class="panel-header">
                <h2>{ "Current Employees" }</h2>
            </div>
            <div class="panel-content">
                if employees.is_empty() {
                    <p class="empty">{ "No employees found." }</p>
                } else {
                    <EmployeeTable employees={(*employees).clone()} page_size={props.page_size} />
                }
                <a class="back-link" href={Route::Form.path()} onclick={on_back}>
                    { "Back to Employee Form" }
                </a>
            </div>
        </div>
    }
}
