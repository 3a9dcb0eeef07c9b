use std::net::{SocketAddr, TcpStream};

use log::{debug, info, warn};
use websocket::sync::{Client, Server};

use crate::driver::{Driver, MoveReport};
use crate::planner::{degrees_from_f64, Direction, Heading};
use msg::command::Command;
use msg::response::{Move, Response, Status};

pub fn run_websocket_server(port: u16, driver: &mut Driver) -> anyhow::Result<()> {
    let connection_string = format!("0.0.0.0:{}", port);
    let server = Server::bind(connection_string)?;
    info!(
        "WebSocket server listening for incoming connections on port {}",
        port
    );

    for request in server.filter_map(Result::ok) {
        if let Ok(client) = request.accept() {
            let peer_address = client.peer_addr()?;
            info!("Opened connection with {}", peer_address);
            let res = handle_connection(client, &peer_address, driver);
            match res {
                Ok(_) => info!("Closed connection with {}", peer_address),
                Err(e) => warn!("Error: {} - connection with {} closed", e, peer_address),
            }
        }
    }

    return Ok(());
}

fn handle_connection(
    client: Client<TcpStream>,
    peer_address: &SocketAddr,
    driver: &mut Driver,
) -> anyhow::Result<()> {
    let (mut receiver, mut sender) = client.split()?;
    for message in receiver.incoming_messages() {
        let message = message?;
        debug!("Received message: {:?}", message);
        match message {
            websocket::OwnedMessage::Close(_) => {
                let message = websocket::Message::close();
                sender.send_message(&message)?;
                info!("Client {} disconnected", peer_address);
                break;
            }
            websocket::OwnedMessage::Ping(ping) => {
                let message = websocket::Message::pong(ping);
                sender.send_message(&message)?;
            }
            websocket::OwnedMessage::Text(text) => {
                let response = match serde_json::from_str::<Command>(&text) {
                    Ok(command) => process_message(command, driver),
                    Err(e) => Response::Error(format!("malformed command: {e}")),
                };
                let response = serde_json::to_string(&response)?;
                sender.send_message(&websocket::OwnedMessage::Text(response))?;
            }
            websocket::OwnedMessage::Binary(_) => {
                warn!("Binary message received, not supported");
            }
            _ => {
                warn!("Unsupported message type");
            }
        };
    }
    return Ok(());
}

/// Runs one command to completion and describes the outcome.
pub fn process_message(command: Command, driver: &mut Driver) -> Response {
    let result = match command {
        Command::Status => return Response::Status(status(driver)),
        Command::Zero => {
            driver.zero();
            return Response::Ok;
        }
        Command::Rotate(cmd) => degrees_from_f64(cmd.degrees).and_then(|degrees| {
            driver.rotate(degrees, Direction::from_sign(cmd.direction), cmd.speed)
        }),
        Command::TurnTo(cmd) => degrees_from_f64(cmd.degrees).and_then(|degrees| {
            driver.turn_to(degrees, Heading::from_sign(cmd.direction), cmd.speed)
        }),
    };
    match result {
        Ok(report) => Response::Moved(to_move(&report)),
        Err(e) => Response::Error(e.to_string()),
    }
}

fn status(driver: &Driver) -> Status {
    Status {
        actuator: driver.actuator_name(),
        angle: driver.angle(),
        phase: driver.phase(),
        step: driver.step(),
        default_speed: driver.default_speed(),
    }
}

fn to_move(report: &MoveReport) -> Move {
    Move {
        pulses: report.pulses,
        direction: report.direction.sign(),
        speed: report.speed,
        angle: report.angle,
        phase: report.phase,
    }
}
