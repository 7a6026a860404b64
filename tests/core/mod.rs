mod autolinker;
