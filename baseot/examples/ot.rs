use baseot::ot::{NaorPinkasReceiver, NaorPinkasSender, RandomOtReceiver, RandomOtSender};
use crypto_core::{net_channel_connect, net_channel_listen, AesRng, CommandLineOpt, NetChannel};
use rand::Rng;
use structopt::StructOpt;

fn rand_bool_vec(size: usize) -> Vec<bool> {
    let mut rng = AesRng::new();
    (0..size).map(|_| rng.gen::<bool>()).collect()
}

fn npot_demo(netio: &mut NetChannel, is_server: bool) {
    if is_server {
        let mut rng = AesRng::new();
        let mut ot = NaorPinkasSender::new().unwrap();
        let (m0, m1) = ot.send(netio, 8, &mut rng).unwrap();
        println!("m0 keys: {:?}", m0);
        println!("m1 keys: {:?}", m1);
    } else {
        let select = rand_bool_vec(8);
        let mut rng = AesRng::new();
        let mut ot = NaorPinkasReceiver::new().unwrap();
        let result = ot.receive(netio, &select, &mut rng).unwrap();
        println!("select bits: {:?}", select);
        println!("received keys: {:?}", result);
    }
}

// run the main function in two terminals
// cargo run --example ot -- --is-server 1
// cargo run --example ot -- --is-server 0
pub fn main() {
    let opt = CommandLineOpt::from_args();
    let is_server = opt.is_server != 0;
    let mut netio = if is_server {
        net_channel_listen("127.0.0.1:12345").unwrap()
    } else {
        net_channel_connect("127.0.0.1:12345").unwrap()
    };
    npot_demo(&mut netio, is_server);
}
