use pagia_core::Result;

pub(super) async fn cmd_serve(
    config: pagia_config::PagiaConfig,
    listen: Option<String>,
) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(listen) = listen {
        // Accept "host:port" or a bare port.
        match listen.rsplit_once(':') {
            Some((host, port)) => {
                server_config.host = host.to_string();
                server_config.port = port.parse().map_err(|_| {
                    pagia_core::PagiaError::Config(format!("invalid listen address: {listen}"))
                })?;
            }
            None => {
                server_config.port = listen.parse().map_err(|_| {
                    pagia_core::PagiaError::Config(format!("invalid listen address: {listen}"))
                })?;
            }
        }
    }

    println!("PAGIA workflow API");
    println!("   Listening on http://{}", server_config.listen());
    println!();

    pagia_server::serve(server_config).await
}
