use error_envelope::frameworks::server;

#[tokio::main]
async fn main() {
    server::start().await;
}
