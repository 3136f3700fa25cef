use yew::prelude::*;

use crate::models::{Employee, EmployeeStatus};

fn status_class(status: EmployeeStatus) -> &'static str {
    match status {
        EmployeeStatus::Approved => "status status-approved",
        EmployeeStatus::Declined => "status status-declined",
        EmployeeStatus::Pending => "status status-pending",
    }
}

#[derive(Properties, PartialEq)]
pub struct EmployeeListProps {
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub on_select: Callback<Employee>,
    #[prop_or(AttrValue::Static("No employees yet"))]
    pub empty_text: AttrValue,
}

#[function_component(EmployeeList)]
pub fn employee_list(props: &EmployeeListProps) -> Html {
    if props.loading {
        return html! { <p class="list-loading">{"Loading..."}</p> };
    }
    if props.employees.is_empty() {
        return html! { <p class="list-empty">{props.empty_text.clone()}</p> };
    }

    html! {
        <table class="employee-list">
            <thead>
                <tr>
                    <th>{"Name"}</th>
                    <th>{"Uploaded by"}</th>
                    <th>{"Created"}</th>
                    <th>{"Status"}</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                { for props.employees.iter().map(|employee| {
                    let created = employee
                        .created()
                        .map(|at| at.format("%Y-%m-%d").to_string())
                        .unwrap_or_default();
                    let selected = employee.clone();
                    html! {
                        <tr key={employee.id.clone()}>
                            <td>{employee.full_name()}</td>
                            <td>{employee.uploaded_by.clone().unwrap_or_default()}</td>
                            <td>{created}</td>
                            <td class={status_class(employee.status)}>{employee.status.as_str()}</td>
                            <td>
                                <button class="btn-link" onclick={props.on_select.reform(move |_| selected.clone())}>
                                    {"View"}
                                </button>
                            </td>
                        </tr>
                    }
                }) }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmployeeDetailsProps {
    pub employee: Employee,
    pub on_close: Callback<()>,
    /// Review buttons are shown only when this is set.
    #[prop_or_default]
    pub on_review: Option<Callback<EmployeeStatus>>,
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(EmployeeDetails)]
pub fn employee_details(props: &EmployeeDetailsProps) -> Html {
    let employee = &props.employee;
    let review_button = |status: EmployeeStatus, on_review: &Callback<EmployeeStatus>| {
        html! {
            <button
                class={format!("btn-{}", status.action_label())}
                disabled={props.busy || employee.status == status}
                onclick={on_review.reform(move |_| status)}
            >
                {status.action_label()}
            </button>
        }
    };

    html! {
        <div class="modal">
            <div class="modal-card">
                <h2>{employee.full_name()}</h2>
                <p class={status_class(employee.status)}>{employee.status.as_str()}</p>
                if !employee.photo_url.is_empty() {
                    <img class="employee-photo" src={employee.photo_url.clone()} alt={employee.full_name()} />
                }
                if !employee.resume_url.is_empty() {
                    <a href={employee.resume_url.clone()} target="_blank" rel="noopener">{"Open resume"}</a>
                }
                if let Some(checked_by) = employee.checked_by.clone() {
                    <p class="muted">{format!("Reviewed by {}", checked_by)}</p>
                }
                <div class="modal-actions">
                    if let Some(on_review) = props.on_review.as_ref() {
                        {review_button(EmployeeStatus::Approved, on_review)}
                        {review_button(EmployeeStatus::Declined, on_review)}
                    }
                    <button class="btn-secondary" onclick={props.on_close.reform(|_| ())}>{"Close"}</button>
                </div>
            </div>
        </div>
    }
}
