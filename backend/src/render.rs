use common::messages::StateResponse;
use common::{PlayerNum, Status, COLS};

const STYLE: &str = "\
body { font-family: sans-serif; text-align: center; }
table.board { margin: 1em auto; background: #1d4ed8; border-spacing: 6px; border-radius: 8px; }
td.cell { width: 48px; height: 48px; border-radius: 50%; background: #f8fafc; }
td.p1 { background: #dc2626; }
td.p2 { background: #facc15; }
form.drop { display: inline; }
";

fn status_line(state: &StateResponse) -> String {
    match state.game.status {
        Status::InProgress => format!("Player {} to move", state.game.active_player.number()),
        Status::Win(player_num) => format!("Player {} wins!", player_num.number()),
        Status::Draw => "Draw!".to_string(),
    }
}

fn cell_class(value: u8) -> &'static str {
    match PlayerNum::try_from(value) {
        Ok(PlayerNum::P1) => "cell p1",
        Ok(PlayerNum::P2) => "cell p2",
        Err(_) => "cell",
    }
}

/// Renders the whole game page: one drop button per column, the board with
/// row 0 on top, and the running scores.
pub fn render_page(state: &StateResponse) -> String {
    let mut buttons = String::new();
    for col in 0..COLS {
        buttons.push_str(&format!(
            "<form class=\"drop\" method=\"post\" action=\"/play\">\
             <input type=\"hidden\" name=\"col\" value=\"{col}\">\
             <button type=\"submit\">{}</button></form>\n",
            col + 1
        ));
    }

    let mut rows = String::new();
    for row in state.game.grid.iter() {
        rows.push_str("<tr>");
        for &value in row.iter() {
            rows.push_str(&format!("<td class=\"{}\"></td>", cell_class(value)));
        }
        rows.push_str("</tr>\n");
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n<head>\n<meta charset=\"utf-8\">\n<title>Connect Four</title>\n\
         <style>\n{STYLE}</style>\n</head>\n<body>\n\
         <h1>Connect Four</h1>\n\
         <p class=\"status\">{}</p>\n\
         <p class=\"scores\">Player 1: {} | Player 2: {}</p>\n\
         <div class=\"columns\">\n{buttons}</div>\n\
         <table class=\"board\">\n{rows}</table>\n\
         <p><a href=\"/reset\">New game</a></p>\n\
         </body>\n</html>\n",
        status_line(state),
        state.scores.player1,
        state.scores.player2,
    )
}
