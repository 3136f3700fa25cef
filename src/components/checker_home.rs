use yew::prelude::*;

use crate::components::account_form::AccountForm;
use crate::components::employee_list::{EmployeeDetails, EmployeeList};
use crate::components::nav_bar::{NavBar, NavTab};
use crate::hooks::{use_app_context, AppContext};
use crate::models::{Employee, EmployeeStatus, Maker, RegisterRequest};
use crate::utils::REGISTRATION_FAILED_MESSAGE;

const MAKERS_TAB: &str = "makers";
const EMPLOYEES_TAB: &str = "employees";

fn load_makers(ctx: AppContext, makers: UseStateHandle<Vec<Maker>>, loading: UseStateHandle<bool>) {
    loading.set(true);
    wasm_bindgen_futures::spawn_local(async move {
        match ctx.api.fetch_makers().await {
            Ok(list) => makers.set(list),
            Err(e) => {
                log::error!("❌ Failed to fetch makers: {}", e);
                ctx.report_failure(&e, "Failed to fetch makers");
            }
        }
        loading.set(false);
    });
}

fn load_employees(
    ctx: AppContext,
    employees: UseStateHandle<Vec<Employee>>,
    loading: UseStateHandle<bool>,
) {
    loading.set(true);
    wasm_bindgen_futures::spawn_local(async move {
        match ctx.api.list_employees().await {
            Ok(list) => employees.set(list),
            Err(e) => {
                log::error!("❌ Failed to fetch employees: {}", e);
                ctx.report_failure(&e, "Failed to fetch employees");
            }
        }
        loading.set(false);
    });
}

/// Checker view: the makers they created and the employees to review.
#[function_component(CheckerHome)]
pub fn checker_home() -> Html {
    let ctx = use_app_context();
    let active = use_state(|| MAKERS_TAB);
    let makers = use_state(Vec::<Maker>::new);
    let makers_loading = use_state(|| false);
    let employees = use_state(Vec::<Employee>::new);
    let employees_loading = use_state(|| false);
    let show_create = use_state(|| false);
    let creating = use_state(|| false);
    let selected = use_state(|| None::<Employee>);
    let reviewing = use_state(|| false);

    {
        let ctx = ctx.clone();
        let makers = makers.clone();
        let makers_loading = makers_loading.clone();
        let employees = employees.clone();
        let employees_loading = employees_loading.clone();
        use_effect_with((), move |_| {
            load_makers(ctx.clone(), makers, makers_loading);
            load_employees(ctx, employees, employees_loading);
            || ()
        });
    }

    let on_select_tab = {
        let active = active.clone();
        Callback::from(move |key: &'static str| active.set(key))
    };

    let on_create_maker = {
        let ctx = ctx.clone();
        let makers = makers.clone();
        let makers_loading = makers_loading.clone();
        let show_create = show_create.clone();
        let creating = creating.clone();
        Callback::from(move |account: RegisterRequest| {
            let ctx = ctx.clone();
            let makers = makers.clone();
            let makers_loading = makers_loading.clone();
            let show_create = show_create.clone();
            let creating = creating.clone();
            creating.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match ctx.api.register_maker(&account).await {
                    Ok(response) => {
                        log::info!("✅ Maker {} created", response.maker.email);
                        ctx.success("Account created successfully");
                        show_create.set(false);
                        load_makers(ctx.clone(), makers, makers_loading);
                    }
                    Err(e) => ctx.report_failure(
                        &e,
                        e.message_from(&["message"], REGISTRATION_FAILED_MESSAGE),
                    ),
                }
                creating.set(false);
            });
        })
    };

    let on_review = {
        let ctx = ctx.clone();
        let selected = selected.clone();
        let reviewing = reviewing.clone();
        let employees = employees.clone();
        let employees_loading = employees_loading.clone();
        Callback::from(move |status: EmployeeStatus| {
            let Some(employee) = (*selected).clone() else {
                return;
            };
            let ctx = ctx.clone();
            let selected = selected.clone();
            let reviewing = reviewing.clone();
            let employees = employees.clone();
            let employees_loading = employees_loading.clone();
            reviewing.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match ctx.api.update_employee_status(&employee.id, status).await {
                    Ok(updated) => {
                        ctx.success(format!("Successfully {} employee", updated.status));
                        selected.set(None);
                        load_employees(ctx.clone(), employees, employees_loading);
                    }
                    Err(e) => ctx.report_failure(
                        &e,
                        e.message_from(
                            &["error", "detail"],
                            &format!("Failed to {} employee", status.action_label()),
                        ),
                    ),
                }
                reviewing.set(false);
            });
        })
    };

    let tabs = vec![
        NavTab { key: MAKERS_TAB, label: "Makers" },
        NavTab { key: EMPLOYEES_TAB, label: "Employees" },
    ];

    let content = if *active == MAKERS_TAB {
        html! {
            <section class="panel">
                <div class="panel-header">
                    <h2>{"Makers"}</h2>
                    <button class="btn-dark" onclick={{
                        let show_create = show_create.clone();
                        Callback::from(move |_| show_create.set(true))
                    }}>{"Create maker"}</button>
                </div>
                if *makers_loading {
                    <p class="list-loading">{"Loading..."}</p>
                } else if makers.is_empty() {
                    <p class="list-empty">{"No makers yet"}</p>
                } else {
                    <ul class="maker-list">
                        { for makers.iter().map(|maker| html! {
                            <li key={maker.id.to_string()}>
                                <span>{maker.email.clone()}</span>
                                <span class="muted">{ if maker.is_active { "active" } else { "inactive" } }</span>
                            </li>
                        }) }
                    </ul>
                }
            </section>
        }
    } else {
        html! {
            <section class="panel">
                <h2>{"Employees"}</h2>
                <EmployeeList
                    employees={(*employees).clone()}
                    loading={*employees_loading}
                    on_select={{
                        let selected = selected.clone();
                        Callback::from(move |employee| selected.set(Some(employee)))
                    }}
                />
            </section>
        }
    };

    html! {
        <div class="home">
            <NavBar {tabs} active={Some(*active)} on_select={on_select_tab} />
            <main>{content}</main>

            if *show_create {
                <div class="modal">
                    <div class="modal-card">
                        <AccountForm
                            title="Create maker account"
                            submit_label="Create"
                            busy={*creating}
                            on_submit={on_create_maker}
                        />
                        <button class="btn-secondary" onclick={{
                            let show_create = show_create.clone();
                            Callback::from(move |_| show_create.set(false))
                        }}>{"Cancel"}</button>
                    </div>
                </div>
            }

            if let Some(employee) = (*selected).clone() {
                <EmployeeDetails
                    {employee}
                    busy={*reviewing}
                    on_review={Some(on_review)}
                    on_close={{
                        let selected = selected.clone();
                        Callback::from(move |_| selected.set(None))
                    }}
                />
            }
        </div>
    }
}
