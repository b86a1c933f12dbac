//! Shared setup: a fresh mock server per test and a context pointing at it.

use petfriends_acceptance::{fixtures, init_tracing, Context, PetFriends};
use petfriends_core::{AuthKey, Credentials, NewPet};

/// Start the mock server on a random port and return its base URL.
pub fn spawn_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Context for the demo account on a fresh mock server.
pub fn mock_context() -> Context {
    init_tracing();
    let base_url = spawn_mock_server();
    Context::new(
        PetFriends::new(&base_url),
        Credentials::new(mock_server::DEMO_EMAIL, mock_server::DEMO_PASSWORD),
        fixtures::default_photo().unwrap(),
    )
}

pub fn demo_key(ctx: &Context) -> AuthKey {
    ctx.api.get_api_key(&ctx.credentials).unwrap().into_parsed().unwrap()
}

/// Give the demo account one pet so list and update scenarios have data.
pub fn seed_pet(ctx: &Context) -> String {
    let key = demo_key(ctx);
    let response = ctx
        .api
        .add_new_pet_simple(&key, &NewPet::new("Seed", "cat", 1))
        .unwrap();
    assert_eq!(response.status, 200);
    response.into_parsed().unwrap().id
}
