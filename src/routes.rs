use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(handlers::index)))
        .service(
            web::resource("/entries")
                .route(web::post().to(handlers::entry::add_entry))
                .route(web::get().to(handlers::entry::get_all_entries)),
        )
        .service(
            web::resource("/entries/{entry_id}")
                .route(web::patch().to(handlers::entry::update_entry))
                .route(web::delete().to(handlers::entry::delete_entry)),
        )
        .service(
            web::resource("/employees")
                .route(web::post().to(handlers::employee::create_employee))
                .route(web::get().to(handlers::employee::get_employees)),
        )
        .service(
            web::resource("/employees/{employee_id}")
                .route(web::get().to(handlers::employee::get_employee))
                .route(web::patch().to(handlers::employee::update_employee))
                .route(web::delete().to(handlers::employee::delete_employee)),
        )
        .service(
            web::resource("/access")
                .route(web::get().to(handlers::access::allow_employee_access)),
        )
        .service(
            web::resource("/register")
                .route(web::get().to(handlers::access::register_new_employee_account)),
        )
        .service(
            web::resource("/createUser")
                .route(web::get().to(handlers::access::create_new_user)),
        );
}
