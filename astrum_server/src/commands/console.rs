//! Feeds console input lines into the command queue

use std::{
    io::BufRead,
    sync::{
        Mutex,
        mpsc::{Receiver, TryRecvError, channel},
    },
    thread,
};

use astrum_core::state::GameState;
use bevy::prelude::*;

use super::{CommandSender, CommandSent};

#[derive(Resource)]
struct ConsoleInput(Mutex<Receiver<String>>);

fn setup_console(mut commands: Commands) {
    let (tx, rx) = channel();

    // Blocking stdin reads stay off the tick loop; the thread dies with the
    // process
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    commands.insert_resource(ConsoleInput(Mutex::new(rx)));
}

fn poll_console(input: Res<ConsoleInput>, mut evw_sent: MessageWriter<CommandSent>) {
    let Ok(receiver) = input.0.lock() else {
        return;
    };

    loop {
        match receiver.try_recv() {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    evw_sent.write(CommandSent::new(line.to_owned(), CommandSender::Server));
                }
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
}

pub(super) fn register(app: &mut App) {
    app.add_systems(Startup, setup_console);
    app.add_systems(Update, poll_console.run_if(in_state(GameState::Playing)));
}
