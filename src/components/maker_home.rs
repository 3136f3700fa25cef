use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::employee_list::{EmployeeDetails, EmployeeList};
use crate::components::nav_bar::{NavBar, NavTab};
use crate::hooks::{use_app_context, AppContext};
use crate::models::{Attachment, Employee, EmployeeUpload};
use crate::utils::files::{read_attachment, selected_file};
use crate::utils::validate_upload;

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

async fn read_input(input: &NodeRef) -> Result<Option<Attachment>, String> {
    match input.cast::<HtmlInputElement>().as_ref().and_then(selected_file) {
        Some(file) => read_attachment(&file).await.map(Some),
        None => Ok(None),
    }
}

/// Maker view: their uploads and the upload form.
#[function_component(MakerHome)]
pub fn maker_home() -> Html {
    let ctx = use_app_context();
    let employees = use_state(Vec::<Employee>::new);
    let loading = use_state(|| false);
    let show_upload = use_state(|| false);
    let submitting = use_state(|| false);
    let selected = use_state(|| None::<Employee>);
    let first_name_ref = use_node_ref();
    let last_name_ref = use_node_ref();
    let photo_ref = use_node_ref();
    let resume_ref = use_node_ref();

    {
        let ctx = ctx.clone();
        let employees = employees.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            load_employees(ctx, employees, loading);
            || ()
        });
    }

    let on_submit = {
        let ctx = ctx.clone();
        let employees = employees.clone();
        let loading = loading.clone();
        let show_upload = show_upload.clone();
        let submitting = submitting.clone();
        let refs = (
            first_name_ref.clone(),
            last_name_ref.clone(),
            photo_ref.clone(),
            resume_ref.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (first_name_ref, last_name_ref, photo_ref, resume_ref) = refs.clone();
            let value_of = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value().trim().to_string())
                    .unwrap_or_default()
            };
            let first_name = value_of(&first_name_ref);
            let last_name = value_of(&last_name_ref);

            let ctx = ctx.clone();
            let employees = employees.clone();
            let loading = loading.clone();
            let show_upload = show_upload.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let files = match (read_input(&photo_ref).await, read_input(&resume_ref).await) {
                    (Ok(photo), Ok(resume)) => Some((photo, resume)),
                    (Err(e), _) | (_, Err(e)) => {
                        ctx.error(e);
                        None
                    }
                };
                let Some((photo, resume)) = files else {
                    submitting.set(false);
                    return;
                };
                if let Err(err) =
                    validate_upload(&first_name, &last_name, photo.as_ref(), resume.as_ref())
                {
                    ctx.error(err.to_string());
                    submitting.set(false);
                    return;
                }
                let (Some(photo), Some(resume)) = (photo, resume) else {
                    submitting.set(false);
                    return;
                };

                let upload = EmployeeUpload {
                    first_name,
                    last_name,
                    photo,
                    resume,
                };
                match ctx.api.upload_employee(&upload).await {
                    Ok(employee) => {
                        log::info!("✅ Uploaded {}", employee.full_name());
                        ctx.success("Employee uploaded successfully");
                        show_upload.set(false);
                        load_employees(ctx.clone(), employees, loading);
                    }
                    Err(e) => {
                        ctx.report_failure(&e, e.message_from(&["detail"], "Failed to upload employee"))
                    }
                }
                submitting.set(false);
            });
        })
    };

    let tabs = vec![NavTab { key: "employees", label: "Employees" }];

    html! {
        <div class="home">
            <NavBar {tabs} active={Some("employees")} />
            <main>
                <section class="panel">
                    <div class="panel-header">
                        <h2>{"My uploads"}</h2>
                        <button class="btn-dark" onclick={{
                            let show_upload = show_upload.clone();
                            Callback::from(move |_| show_upload.set(true))
                        }}>{"Upload employee"}</button>
                    </div>
                    <EmployeeList
                        employees={(*employees).clone()}
                        loading={*loading}
                        empty_text="You have not uploaded any employees yet"
                        on_select={{
                            let selected = selected.clone();
                            Callback::from(move |employee| selected.set(Some(employee)))
                        }}
                    />
                </section>
            </main>

            if *show_upload {
                <div class="modal">
                    <form class="modal-card upload-form" onsubmit={on_submit}>
                        <h2>{"Upload employee"}</h2>
                        <label>{"First name"}<input type="text" ref={first_name_ref} /></label>
                        <label>{"Last name"}<input type="text" ref={last_name_ref} /></label>
                        <label>{"Photo (JPEG or PNG, max 5MB)"}
                            <input type="file" accept="image/jpeg,image/png" ref={photo_ref} />
                        </label>
                        <label>{"Resume (PDF, max 5MB)"}
                            <input type="file" accept="application/pdf" ref={resume_ref} />
                        </label>
                        <div class="modal-actions">
                            <button type="submit" class="btn-dark" disabled={*submitting}>
                                { if *submitting { "Uploading..." } else { "Upload" } }
                            </button>
                            <button type="button" class="btn-secondary" onclick={{
                                let show_upload = show_upload.clone();
                                Callback::from(move |_| show_upload.set(false))
                            }}>{"Cancel"}</button>
                        </div>
                    </form>
                </div>
            }

            if let Some(employee) = (*selected).clone() {
                <EmployeeDetails
                    {employee}
                    on_close={{
                        let selected = selected.clone();
                        Callback::from(move |_| selected.set(None))
                    }}
                />
            }
        </div>
    }
}
